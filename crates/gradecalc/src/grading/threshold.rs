use super::component::ComponentSet;
use super::contribution::known_contribution;
use super::outcome::CalculationOutcome;
use super::validation::{check_passing_grade, GradingError};

/// Score still needed from the single unset component to reach `passing_grade`.
pub fn solve_threshold(
    set: &ComponentSet,
    passing_grade: f64,
) -> Result<CalculationOutcome, GradingError> {
    let unknowns = set.unknown_indices();
    let unknown = match unknowns.as_slice() {
        [index] => *index,
        other => return Err(GradingError::AmbiguousUnknowns { count: other.len() }),
    };

    let weight = set.components()[unknown].weight;
    check_unknown_weight(unknown, weight)?;

    let contribution = known_contribution(set.components(), unknown)?;
    Ok(invert(contribution, weight, passing_grade))
}

/// Inverts `contribution + x * weight / 100 = passing_grade` for `x`.
///
/// `weight` must be strictly positive, `contribution` finite and
/// `passing_grade` within `[0, 100]`. Results above 100 are unachievable and
/// results below zero mean the pass is already secured.
pub fn required_score(
    contribution: f64,
    weight: f64,
    passing_grade: f64,
) -> Result<CalculationOutcome, GradingError> {
    let passing_grade = check_passing_grade(passing_grade)?;
    if !contribution.is_finite() {
        return Err(GradingError::InvalidContribution {
            value: contribution,
        });
    }
    check_unknown_weight(0, weight)?;
    Ok(invert(contribution, weight, passing_grade))
}

fn invert(contribution: f64, weight: f64, passing_grade: f64) -> CalculationOutcome {
    let required = (passing_grade - contribution) * 100.0 / weight;
    if required > 100.0 {
        CalculationOutcome::Unachievable
    } else if required < 0.0 {
        CalculationOutcome::Achievable {
            required_score: 0.0,
        }
    } else {
        CalculationOutcome::Achievable {
            required_score: required,
        }
    }
}

fn check_unknown_weight(index: usize, weight: f64) -> Result<(), GradingError> {
    if weight > 0.0 && weight.is_finite() {
        Ok(())
    } else {
        Err(GradingError::InvalidWeight { index, weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn achievable(outcome: CalculationOutcome) -> f64 {
        match outcome {
            CalculationOutcome::Achievable { required_score } => required_score,
            other => panic!("expected achievable outcome, got {other:?}"),
        }
    }

    #[test]
    fn solved_score_reaches_passing_grade() {
        for contribution in [0.0, 12.5, 33.3, 45.0, 59.9] {
            for weight in [10.0, 40.0, 60.0, 100.0] {
                for passing_grade in [40.0, 50.0, 60.0, 70.0] {
                    let outcome = required_score(contribution, weight, passing_grade)
                        .expect("positive weight");
                    if let CalculationOutcome::Achievable { required_score } = outcome {
                        if required_score > 0.0 {
                            let reached = contribution + required_score * weight / 100.0;
                            assert!((reached - passing_grade).abs() < 1e-9);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn raising_the_passing_grade_never_lowers_requirement() {
        let mut previous = 0.0;
        for step in 0..=100 {
            let passing_grade = step as f64;
            let required = match required_score(45.0, 40.0, passing_grade).expect("valid") {
                CalculationOutcome::Achievable { required_score } => required_score,
                CalculationOutcome::Unachievable => f64::INFINITY,
                other => panic!("unexpected outcome {other:?}"),
            };
            assert!(required >= previous);
            previous = required;
        }
    }

    #[test]
    fn exactly_one_hundred_is_still_achievable() {
        assert_eq!(achievable(required_score(20.0, 40.0, 60.0).expect("valid")), 100.0);
        assert_eq!(
            required_score(20.0 - 1e-6, 40.0, 60.0).expect("valid"),
            CalculationOutcome::Unachievable
        );
    }

    #[test]
    fn secured_pass_requires_zero() {
        assert_eq!(achievable(required_score(75.0, 40.0, 60.0).expect("valid")), 0.0);
    }

    #[test]
    fn zero_weight_is_rejected_for_any_input() {
        for (contribution, passing_grade) in [(0.0, 60.0), (80.0, 10.0), (45.0, 100.0)] {
            assert!(matches!(
                required_score(contribution, 0.0, passing_grade),
                Err(GradingError::InvalidWeight { .. })
            ));
        }
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(
            required_score(45.0, -5.0, 60.0),
            Err(GradingError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(matches!(
            required_score(f64::NAN, 40.0, 60.0),
            Err(GradingError::InvalidContribution { .. })
        ));
        assert!(matches!(
            required_score(f64::INFINITY, 40.0, 60.0),
            Err(GradingError::InvalidContribution { .. })
        ));
        assert!(matches!(
            required_score(45.0, 40.0, f64::NAN),
            Err(GradingError::InvalidPassingGrade { .. })
        ));
        assert!(matches!(
            required_score(45.0, 40.0, 120.0),
            Err(GradingError::InvalidPassingGrade { .. })
        ));
    }
}
