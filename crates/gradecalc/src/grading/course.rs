use serde::Serialize;

use super::classifier::{classify, LetterGrade};
use super::component::ComponentSet;
use super::contribution::compute_contribution;
use super::scheme::WeightingScheme;

/// A named course on a student's grade sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub name: String,
    pub scheme: WeightingScheme,
    pub components: ComponentSet,
}

impl Course {
    pub fn new(name: impl Into<String>, scheme: WeightingScheme) -> Self {
        Self {
            name: name.into(),
            scheme,
            components: scheme.default_set(),
        }
    }

    pub fn with_components(mut self, components: ComponentSet) -> Self {
        self.components = components;
        self
    }
}

/// Per-course line of a grade sheet; scores stay pending until every one is entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CourseStanding {
    Pending {
        name: String,
        missing: Vec<String>,
    },
    Graded {
        name: String,
        final_score: f64,
        letter_grade: LetterGrade,
        passed: bool,
    },
}

impl CourseStanding {
    pub fn name(&self) -> &str {
        match self {
            CourseStanding::Pending { name, .. } | CourseStanding::Graded { name, .. } => name,
        }
    }
}

pub fn evaluate_courses(courses: &[Course], passing_grade: f64) -> Vec<CourseStanding> {
    courses
        .iter()
        .map(|course| evaluate_course(course, passing_grade))
        .collect()
}

fn evaluate_course(course: &Course, passing_grade: f64) -> CourseStanding {
    match compute_contribution(course.components.components()) {
        Ok(final_score) => CourseStanding::Graded {
            name: course.name.clone(),
            final_score,
            letter_grade: classify(final_score),
            passed: final_score >= passing_grade,
        },
        Err(_) => {
            let len = course.components.len();
            CourseStanding::Pending {
                name: course.name.clone(),
                missing: course
                    .components
                    .unknown_indices()
                    .into_iter()
                    .map(|index| course.scheme.component_name(index, len))
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graded_and_pending_courses_are_reported() {
        let graded = WeightingScheme::Midterm
            .default_set()
            .set_score(0, Some(50.0))
            .and_then(|set| set.set_score(1, Some(70.0)))
            .expect("indices valid");
        let courses = vec![
            Course::new("Physiology", WeightingScheme::Midterm).with_components(graded),
            Course::new("Anatomy", WeightingScheme::Midterm),
        ];

        let standings = evaluate_courses(&courses, 60.0);

        match &standings[0] {
            CourseStanding::Graded {
                final_score,
                letter_grade,
                passed,
                ..
            } => {
                assert!((final_score - 62.0).abs() < 1e-9);
                assert_eq!(*letter_grade, LetterGrade::DD);
                assert!(*passed);
            }
            other => panic!("expected graded course, got {other:?}"),
        }
        assert_eq!(
            standings[1],
            CourseStanding::Pending {
                name: "Anatomy".to_string(),
                missing: vec!["Midterm 1".to_string(), "Final".to_string()],
            }
        );
        assert_eq!(standings[1].name(), "Anatomy");
    }
}
