//! Weighted course-grade computation.
//!
//! A [`ComponentSet`] holds the graded components of one course. The engine
//! either combines a fully graded set into a final score or solves for the one
//! missing score that exactly reaches the passing grade. Every function here
//! is pure; history persistence sits behind the [`HistoryStore`] port.

pub mod classifier;
pub mod combination;
pub mod component;
pub mod contribution;
pub mod course;
pub mod engine;
pub mod history;
pub mod outcome;
pub mod router;
pub mod scheme;
pub mod service;
pub mod threshold;
pub mod validation;

#[cfg(test)]
mod tests;

pub use classifier::{classify, LetterGrade};
pub use combination::combine;
pub use component::{ComponentSet, WeightedComponent, MAX_COMPONENTS, MIN_COMPONENTS};
pub use contribution::compute_contribution;
pub use course::{evaluate_courses, Course, CourseStanding};
pub use engine::{Calculation, GradeEngine, DEFAULT_PASSING_GRADE};
pub use history::{CalculationRecord, HistoryError, HistoryStore, RecordId};
pub use outcome::{CalculationMode, CalculationOutcome};
pub use router::grading_router;
pub use scheme::WeightingScheme;
pub use service::{
    CalculationRequest, CalculationView, ComponentInput, CourseInput, GradeService,
    GradeServiceError, GradeSheetRequest,
};
pub use threshold::{required_score, solve_threshold};
pub use validation::{weight_advisories, Advisory, GradingError};
