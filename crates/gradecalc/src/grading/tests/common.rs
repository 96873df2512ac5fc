use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::grading::component::{ComponentSet, WeightedComponent};
use crate::grading::engine::GradeEngine;
use crate::grading::history::{CalculationRecord, HistoryError, HistoryStore, RecordId};
use crate::grading::service::{CalculationRequest, ComponentInput, GradeService};
use crate::grading::{grading_router, WeightingScheme};

pub(super) const TOLERANCE: f64 = 1e-9;

/// Two committees at 30 with scores 70 and 80; the final at 40 is unknown.
pub(super) fn committee_with_unknown_final() -> ComponentSet {
    WeightingScheme::Committee
        .default_set()
        .set_score(0, Some(70.0))
        .and_then(|set| set.set_score(1, Some(80.0)))
        .expect("indices valid")
}

pub(super) fn fully_graded_pair() -> ComponentSet {
    ComponentSet::new(vec![
        WeightedComponent::new(50.0, Some(90.0)),
        WeightedComponent::new(50.0, Some(90.0)),
    ])
    .expect("valid set")
}

pub(super) fn committee_request(passing_grade: f64) -> CalculationRequest {
    CalculationRequest {
        scheme: WeightingScheme::Committee,
        components: vec![
            ComponentInput {
                weight: 30.0,
                score: Some(70.0),
            },
            ComponentInput {
                weight: 30.0,
                score: Some(80.0),
            },
            ComponentInput {
                weight: 40.0,
                score: None,
            },
        ],
        passing_grade: Some(passing_grade),
        save: false,
        label: None,
    }
}

pub(super) fn year_end_request() -> CalculationRequest {
    CalculationRequest {
        scheme: WeightingScheme::Midterm,
        components: vec![
            ComponentInput {
                weight: 50.0,
                score: Some(90.0),
            },
            ComponentInput {
                weight: 50.0,
                score: Some(90.0),
            },
        ],
        passing_grade: None,
        save: false,
        label: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    records: Mutex<Vec<CalculationRecord>>,
}

impl MemoryHistory {
    pub(super) fn records(&self) -> Vec<CalculationRecord> {
        self.records.lock().expect("history mutex poisoned").clone()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&self, record: CalculationRecord) -> Result<CalculationRecord, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(HistoryError::Conflict);
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
        Ok(self.records())
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        let cleared = guard.len();
        guard.clear();
        Ok(cleared)
    }
}

pub(super) struct UnavailableHistory;

impl HistoryStore for UnavailableHistory {
    fn append(&self, _record: CalculationRecord) -> Result<CalculationRecord, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }

    fn remove(&self, _id: &RecordId) -> Result<CalculationRecord, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CalculationRecord>, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }

    fn clear(&self) -> Result<usize, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<GradeService<MemoryHistory>>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = Arc::new(GradeService::new(history.clone(), GradeEngine::default()));
    (service, history)
}

pub(super) fn router_with_service(service: Arc<GradeService<MemoryHistory>>) -> axum::Router {
    grading_router(service)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
