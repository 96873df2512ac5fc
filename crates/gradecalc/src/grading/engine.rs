use serde::Serialize;
use tracing::debug;

use super::classifier::{classify, LetterGrade};
use super::combination::combine;
use super::component::ComponentSet;
use super::outcome::{CalculationMode, CalculationOutcome};
use super::threshold::solve_threshold;
use super::validation::{check_passing_grade, weight_advisories, Advisory, GradingError};

pub const DEFAULT_PASSING_GRADE: f64 = 60.0;

/// Stateless calculator; the only setting is the fallback passing grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeEngine {
    passing_grade: f64,
}

impl Default for GradeEngine {
    fn default() -> Self {
        Self {
            passing_grade: DEFAULT_PASSING_GRADE,
        }
    }
}

/// Everything a presenter needs from one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub mode: CalculationMode,
    pub outcome: CalculationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_grade: Option<LetterGrade>,
    pub derived_weight: f64,
    pub advisories: Vec<Advisory>,
}

impl GradeEngine {
    pub fn new(passing_grade: f64) -> Result<Self, GradingError> {
        Ok(Self {
            passing_grade: check_passing_grade(passing_grade)?,
        })
    }

    pub fn passing_grade(&self) -> f64 {
        self.passing_grade
    }

    pub fn calculate(
        &self,
        set: &ComponentSet,
        mode: CalculationMode,
    ) -> Result<Calculation, GradingError> {
        let passing_grade = check_passing_grade(mode.passing_grade())?;
        let advisories = weight_advisories(set.components());

        let outcome = match mode {
            CalculationMode::ThresholdInversion { .. } => solve_threshold(set, passing_grade)?,
            CalculationMode::DirectCombination { .. } => combine(set, passing_grade)?,
        };

        let letter_grade = match outcome {
            CalculationOutcome::Completed { final_score, .. } => Some(classify(final_score)),
            _ => None,
        };

        debug!(
            mode = mode.label(),
            passing_grade,
            components = set.len(),
            imbalanced = !advisories.is_empty(),
            ?outcome,
            "grade calculation completed"
        );

        Ok(Calculation {
            mode,
            outcome,
            letter_grade,
            derived_weight: set.derived_weight(),
            advisories,
        })
    }

    /// Threshold inversion against `passing_grade`, or the engine default.
    pub fn minimum_final(
        &self,
        set: &ComponentSet,
        passing_grade: Option<f64>,
    ) -> Result<Calculation, GradingError> {
        self.calculate(
            set,
            CalculationMode::ThresholdInversion {
                passing_grade: passing_grade.unwrap_or(self.passing_grade),
            },
        )
    }

    /// Direct combination against `passing_grade`, or the engine default.
    pub fn year_end(
        &self,
        set: &ComponentSet,
        passing_grade: Option<f64>,
    ) -> Result<Calculation, GradingError> {
        self.calculate(
            set,
            CalculationMode::DirectCombination {
                passing_grade: passing_grade.unwrap_or(self.passing_grade),
            },
        )
    }
}
