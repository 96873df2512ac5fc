use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::component::{ComponentSet, WeightedComponent};
use super::course::{evaluate_courses, Course, CourseStanding};
use super::engine::{Calculation, GradeEngine};
use super::history::{CalculationRecord, HistoryError, HistoryStore, RecordId};
use super::scheme::WeightingScheme;
use super::validation::{check_passing_grade, GradingError};

/// Caller-supplied component snapshot entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    pub weight: f64,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Payload for the minimum-final and year-end calculators.
///
/// An empty `components` list falls back to the scheme's default layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub scheme: WeightingScheme,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
    #[serde(default)]
    pub passing_grade: Option<f64>,
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl CalculationRequest {
    pub fn component_set(&self) -> Result<ComponentSet, GradingError> {
        component_set(self.scheme, &self.components)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInput {
    pub name: String,
    #[serde(default)]
    pub scheme: WeightingScheme,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeSheetRequest {
    pub courses: Vec<CourseInput>,
    #[serde(default)]
    pub passing_grade: Option<f64>,
}

/// Calculation plus the presentation values the calculators show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationView {
    #[serde(flatten)]
    pub calculation: Calculation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_score: Option<f64>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

/// Service composing the grade engine with the caller's history store.
pub struct GradeService<H> {
    engine: GradeEngine,
    history: Arc<H>,
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id() -> RecordId {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("calc-{id:06}"))
}

fn component_set(
    scheme: WeightingScheme,
    inputs: &[ComponentInput],
) -> Result<ComponentSet, GradingError> {
    if inputs.is_empty() {
        return Ok(scheme.default_set());
    }
    ComponentSet::new(
        inputs
            .iter()
            .map(|input| WeightedComponent::new(input.weight, input.score))
            .collect(),
    )
}

impl<H> GradeService<H>
where
    H: HistoryStore + 'static,
{
    pub fn new(history: Arc<H>, engine: GradeEngine) -> Self {
        Self { engine, history }
    }

    pub fn engine(&self) -> &GradeEngine {
        &self.engine
    }

    /// Minimum final-exam score needed to pass.
    pub fn minimum_final(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationView, GradeServiceError> {
        let set = request.component_set()?;
        let calculation = self.engine.minimum_final(&set, request.passing_grade)?;
        self.finish(request, &set, calculation)
    }

    /// Course score once every component is graded.
    pub fn year_end(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationView, GradeServiceError> {
        let set = request.component_set()?;
        let calculation = self.engine.year_end(&set, request.passing_grade)?;
        self.finish(request, &set, calculation)
    }

    pub fn grade_sheet(
        &self,
        request: GradeSheetRequest,
    ) -> Result<Vec<CourseStanding>, GradeServiceError> {
        let passing_grade = check_passing_grade(
            request
                .passing_grade
                .unwrap_or_else(|| self.engine.passing_grade()),
        )?;

        let courses = request
            .courses
            .into_iter()
            .map(|input| {
                let components = component_set(input.scheme, &input.components)?;
                Ok(Course::new(input.name, input.scheme).with_components(components))
            })
            .collect::<Result<Vec<_>, GradingError>>()?;

        Ok(evaluate_courses(&courses, passing_grade))
    }

    pub fn history(&self) -> Result<Vec<CalculationRecord>, GradeServiceError> {
        Ok(self.history.list()?)
    }

    pub fn delete(&self, id: &RecordId) -> Result<CalculationRecord, GradeServiceError> {
        let removed = self.history.remove(id)?;
        info!(record_id = %removed.id.0, "saved calculation removed");
        Ok(removed)
    }

    pub fn clear_history(&self) -> Result<usize, GradeServiceError> {
        let cleared = self.history.clear()?;
        info!(cleared, "calculation history cleared");
        Ok(cleared)
    }

    fn finish(
        &self,
        request: CalculationRequest,
        set: &ComponentSet,
        calculation: Calculation,
    ) -> Result<CalculationView, GradeServiceError> {
        let record_id = if request.save {
            let record = CalculationRecord {
                id: next_record_id(),
                label: request.label,
                mode: calculation.mode,
                scores: set.scores(),
                weights: set.weights(),
                outcome: calculation.outcome,
                recorded_at: Utc::now(),
            };
            let stored = self.history.append(record)?;
            info!(record_id = %stored.id.0, mode = stored.mode.label(), "calculation saved");
            Some(stored.id)
        } else {
            None
        };

        Ok(CalculationView {
            display_score: calculation.outcome.display_score(),
            summary: calculation.outcome.summary(),
            calculation,
            record_id,
        })
    }
}

/// Error raised by the grade service.
#[derive(Debug, thiserror::Error)]
pub enum GradeServiceError {
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
