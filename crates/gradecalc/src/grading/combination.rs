use super::component::ComponentSet;
use super::contribution::compute_contribution;
use super::outcome::CalculationOutcome;
use super::validation::GradingError;

/// Final course score when every component, the final exam included, is known.
pub fn combine(set: &ComponentSet, passing_grade: f64) -> Result<CalculationOutcome, GradingError> {
    let final_score = compute_contribution(set.components())?;
    Ok(CalculationOutcome::Completed {
        final_score,
        passed: final_score >= passing_grade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::component::WeightedComponent;

    #[test]
    fn matches_direct_weighted_sum() {
        let cases = [
            (vec![50.0, 50.0], vec![90.0, 90.0]),
            (vec![18.67, 15.0, 15.0, 51.33], vec![72.0, 64.5, 88.0, 41.25]),
            (vec![40.0, 60.0], vec![33.0, 100.0]),
        ];

        for (weights, scores) in cases {
            let components = weights
                .iter()
                .zip(&scores)
                .map(|(weight, score)| WeightedComponent::new(*weight, Some(*score)))
                .collect();
            let set = ComponentSet::new(components).expect("valid set");
            let expected: f64 = weights
                .iter()
                .zip(&scores)
                .map(|(weight, score)| score * weight / 100.0)
                .sum();

            match combine(&set, 60.0).expect("all known") {
                CalculationOutcome::Completed { final_score, .. } => {
                    assert!((final_score - expected).abs() < 1e-9)
                }
                other => panic!("expected completed outcome, got {other:?}"),
            }
        }
    }

    #[test]
    fn passing_is_inclusive() {
        let set = ComponentSet::new(vec![
            WeightedComponent::new(40.0, Some(60.0)),
            WeightedComponent::new(60.0, Some(60.0)),
        ])
        .expect("valid set");

        assert!(matches!(
            combine(&set, 60.0),
            Ok(CalculationOutcome::Completed { passed: true, .. })
        ));
        assert!(matches!(
            combine(&set, 60.5),
            Ok(CalculationOutcome::Completed { passed: false, .. })
        ));
    }

    #[test]
    fn missing_final_score_is_incomplete() {
        let set = ComponentSet::with_weights(&[40.0])
            .and_then(|set| set.set_score(0, Some(75.0)))
            .expect("valid set");

        assert_eq!(
            combine(&set, 60.0),
            Err(GradingError::IncompleteInput { index: 1 })
        );
    }
}
