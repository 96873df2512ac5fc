use serde::{Deserialize, Serialize};

use super::component::{WeightedComponent, MAX_COMPONENTS, MIN_COMPONENTS};

/// Totals within this distance of 100 count as balanced.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Typed failure for a grading request that cannot be computed as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradingError {
    #[error("score for component {index} has not been entered")]
    IncompleteInput { index: usize },
    #[error("component {index} has weight {weight}; the unknown score cannot influence the result")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("expected exactly one unknown score, found {count}")]
    AmbiguousUnknowns { count: usize },
    #[error("a component set holds between 1 and 10 components, got {count}")]
    ComponentCount { count: usize },
    #[error("component {index} carries the derived weight and cannot be edited")]
    ReadOnlyWeight { index: usize },
    #[error("component index {index} is out of range for {len} components")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("passing grade {value} must be a number between 0 and 100")]
    InvalidPassingGrade { value: f64 },
    #[error("known contribution {value} is not a finite number")]
    InvalidContribution { value: f64 },
}

/// Non-fatal findings reported alongside a computed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    ImbalancedWeights { total: f64, derived_weight: f64 },
}

impl Advisory {
    pub fn summary(&self) -> String {
        match self {
            Advisory::ImbalancedWeights {
                total,
                derived_weight,
            } => format!(
                "weights total {:.2} instead of 100 (derived weight {:.2})",
                total, derived_weight
            ),
        }
    }
}

pub(crate) fn check_count(count: usize) -> Result<(), GradingError> {
    if (MIN_COMPONENTS..=MAX_COMPONENTS).contains(&count) {
        Ok(())
    } else {
        Err(GradingError::ComponentCount { count })
    }
}

pub(crate) fn check_passing_grade(value: f64) -> Result<f64, GradingError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(GradingError::InvalidPassingGrade { value })
    }
}

/// Flags a set whose derived slot left `[0, 100]` or whose weights do not sum to 100.
pub fn weight_advisories(components: &[WeightedComponent]) -> Vec<Advisory> {
    let Some(derived) = components.last() else {
        return Vec::new();
    };

    let total: f64 = components.iter().map(|component| component.weight).sum();
    let derived_out_of_range = !(0.0..=100.0).contains(&derived.weight);
    if derived_out_of_range || (total - 100.0).abs() > WEIGHT_TOLERANCE {
        vec![Advisory::ImbalancedWeights {
            total,
            derived_weight: derived.weight,
        }]
    } else {
        Vec::new()
    }
}

pub(crate) fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
