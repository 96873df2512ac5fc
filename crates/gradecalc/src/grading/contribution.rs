use super::component::WeightedComponent;
use super::validation::GradingError;

/// Sum of `score * weight / 100` over every component.
///
/// Fails on the first unset score; no rounding is applied.
pub fn compute_contribution(components: &[WeightedComponent]) -> Result<f64, GradingError> {
    sum_contributions(components, |_| true)
}

/// Contribution of every component except `unknown`.
pub(crate) fn known_contribution(
    components: &[WeightedComponent],
    unknown: usize,
) -> Result<f64, GradingError> {
    sum_contributions(components, |index| index != unknown)
}

fn sum_contributions<F>(components: &[WeightedComponent], include: F) -> Result<f64, GradingError>
where
    F: Fn(usize) -> bool,
{
    components
        .iter()
        .enumerate()
        .filter(|(index, _)| include(*index))
        .try_fold(0.0, |total, (index, component)| {
            component
                .contribution()
                .map(|share| total + share)
                .ok_or(GradingError::IncompleteInput { index })
        })
}
