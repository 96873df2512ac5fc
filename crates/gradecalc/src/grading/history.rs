use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::outcome::{CalculationMode, CalculationOutcome};

/// Identifier wrapper for saved calculations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// A calculation the student chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub mode: CalculationMode,
    pub scores: Vec<Option<f64>>,
    pub weights: Vec<f64>,
    pub outcome: CalculationOutcome,
    pub recorded_at: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn passing_grade(&self) -> f64 {
        self.mode.passing_grade()
    }
}

/// Storage port for saved calculations; the engine itself never touches it.
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: CalculationRecord) -> Result<CalculationRecord, HistoryError>;
    fn remove(&self, id: &RecordId) -> Result<CalculationRecord, HistoryError>;
    /// Oldest first.
    fn list(&self) -> Result<Vec<CalculationRecord>, HistoryError>;
    fn clear(&self) -> Result<usize, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("history is full ({limit} records)")]
    Full { limit: usize },
    #[error("history unavailable: {0}")]
    Unavailable(String),
}
