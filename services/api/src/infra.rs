use gradecalc::config::GradingConfig;
use gradecalc::grading::{
    CalculationRecord, GradeEngine, GradingError, HistoryError, HistoryStore, RecordId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history; records live as long as the server does.
#[derive(Clone)]
pub(crate) struct InMemoryHistoryStore {
    records: Arc<Mutex<Vec<CalculationRecord>>>,
    limit: usize,
}

impl InMemoryHistoryStore {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            limit,
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, record: CalculationRecord) -> Result<CalculationRecord, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(HistoryError::Conflict);
        }
        if guard.len() >= self.limit {
            return Err(HistoryError::Full { limit: self.limit });
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn remove(&self, id: &RecordId) -> Result<CalculationRecord, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        let position = guard
            .iter()
            .position(|record| &record.id == id)
            .ok_or(HistoryError::NotFound)?;
        Ok(guard.remove(position))
    }

    fn list(&self) -> Result<Vec<CalculationRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        let cleared = guard.len();
        guard.clear();
        Ok(cleared)
    }
}

pub(crate) fn engine_from_config(config: &GradingConfig) -> Result<GradeEngine, GradingError> {
    GradeEngine::new(config.passing_grade)
}

/// One `--scores` entry; `None` marks the component still to be graded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreArg(pub(crate) Option<f64>);

pub(crate) fn parse_score_arg(raw: &str) -> Result<ScoreArg, String> {
    parse_score(raw).map(ScoreArg)
}

/// Parses a CLI score; `-` or `_` leave the score unset.
pub(crate) fn parse_score(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw == "-" || raw == "_" {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|err| format!("failed to parse '{raw}' as a score ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gradecalc::grading::{CalculationMode, CalculationOutcome};

    fn record(id: &str) -> CalculationRecord {
        CalculationRecord {
            id: RecordId(id.to_string()),
            label: None,
            mode: CalculationMode::ThresholdInversion {
                passing_grade: 60.0,
            },
            scores: vec![Some(70.0), None],
            weights: vec![40.0, 60.0],
            outcome: CalculationOutcome::Achievable {
                required_score: 53.33,
            },
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn store_refuses_duplicates_and_overflow() {
        let store = InMemoryHistoryStore::with_limit(2);
        store.append(record("calc-1")).expect("first append");
        assert!(matches!(
            store.append(record("calc-1")),
            Err(HistoryError::Conflict)
        ));
        store.append(record("calc-2")).expect("second append");
        assert!(matches!(
            store.append(record("calc-3")),
            Err(HistoryError::Full { limit: 2 })
        ));
    }

    #[test]
    fn store_removes_by_id_and_clears() {
        let store = InMemoryHistoryStore::with_limit(10);
        store.append(record("calc-1")).expect("append");
        store.append(record("calc-2")).expect("append");

        let removed = store.remove(&RecordId("calc-1".to_string())).expect("exists");
        assert_eq!(removed.id.0, "calc-1");
        assert!(matches!(
            store.remove(&RecordId("calc-1".to_string())),
            Err(HistoryError::NotFound)
        ));
        assert_eq!(store.clear().expect("clears"), 1);
        assert!(store.list().expect("lists").is_empty());
    }

    #[test]
    fn parse_score_understands_unset_marker() {
        assert_eq!(parse_score("72.5"), Ok(Some(72.5)));
        assert_eq!(parse_score("-"), Ok(None));
        assert!(parse_score("seventy").is_err());
    }
}
