use serde::{Deserialize, Serialize};

/// Letter bands, highest first. The boundaries are illustrative, not a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    AA,
    BA,
    BB,
    CB,
    CC,
    DC,
    DD,
    FD,
    FF,
}

impl LetterGrade {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::AA,
            Self::BA,
            Self::BB,
            Self::CB,
            Self::CC,
            Self::DC,
            Self::DD,
            Self::FD,
            Self::FF,
        ]
    }

    /// Inclusive lower bound of the band.
    pub const fn lower_bound(self) -> f64 {
        match self {
            Self::AA => 90.0,
            Self::BA => 85.0,
            Self::BB => 80.0,
            Self::CB => 75.0,
            Self::CC => 70.0,
            Self::DC => 65.0,
            Self::DD => 60.0,
            Self::FD => 50.0,
            Self::FF => f64::NEG_INFINITY,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AA => "AA",
            Self::BA => "BA",
            Self::BB => "BB",
            Self::CB => "CB",
            Self::CC => "CC",
            Self::DC => "DC",
            Self::DD => "DD",
            Self::FD => "FD",
            Self::FF => "FF",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps any score, in range or not, to its band. Never fails.
pub fn classify(score: f64) -> LetterGrade {
    LetterGrade::ordered()
        .into_iter()
        .find(|grade| score >= grade.lower_bound())
        .unwrap_or(LetterGrade::FF)
}
