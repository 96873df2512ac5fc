use serde::{Deserialize, Serialize};

/// Which question the caller is asking of a component set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationMode {
    /// Solve for the one unset score that exactly reaches `passing_grade`.
    ThresholdInversion { passing_grade: f64 },
    /// Every score is known; reduce to the final course score.
    DirectCombination { passing_grade: f64 },
}

impl CalculationMode {
    pub fn passing_grade(&self) -> f64 {
        match self {
            CalculationMode::ThresholdInversion { passing_grade }
            | CalculationMode::DirectCombination { passing_grade } => *passing_grade,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            CalculationMode::ThresholdInversion { .. } => "minimum final",
            CalculationMode::DirectCombination { .. } => "year end",
        }
    }
}

/// Computed answer of a well-formed request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// Exact, unrounded minimum score in `[0, 100]`.
    Achievable { required_score: f64 },
    Unachievable,
    Completed { final_score: f64, passed: bool },
}

impl CalculationOutcome {
    /// Value shown to students.
    ///
    /// Required scores round up so that the shown value always passes; final
    /// scores keep two decimals.
    pub fn display_score(&self) -> Option<f64> {
        match self {
            CalculationOutcome::Achievable { required_score } => Some(required_score.ceil()),
            CalculationOutcome::Unachievable => None,
            CalculationOutcome::Completed { final_score, .. } => {
                Some((final_score * 100.0).round() / 100.0)
            }
        }
    }

    pub fn is_possible(&self) -> bool {
        !matches!(self, CalculationOutcome::Unachievable)
    }

    pub fn summary(&self) -> String {
        match self {
            CalculationOutcome::Achievable { required_score } if *required_score <= 0.0 => {
                "already passing; any final score is enough".to_string()
            }
            CalculationOutcome::Achievable { required_score } => format!(
                "minimum final score {} (exact {:.2})",
                required_score.ceil(),
                required_score
            ),
            CalculationOutcome::Unachievable => {
                "passing is not possible with the current scores".to_string()
            }
            CalculationOutcome::Completed { final_score, passed } => format!(
                "final score {:.2}, {}",
                final_score,
                if *passed { "passed" } else { "failed" }
            ),
        }
    }
}
