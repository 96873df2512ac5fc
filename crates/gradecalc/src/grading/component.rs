use serde::{Deserialize, Serialize};

use super::validation::{check_count, clamp_percentage, GradingError, WEIGHT_TOLERANCE};

pub const MIN_COMPONENTS: usize = 1;
pub const MAX_COMPONENTS: usize = 10;

/// Weight moved from the previous derived slot onto a newly added component.
const ADDED_COMPONENT_WEIGHT: f64 = 10.0;

/// One graded item: a midterm, a committee assessment, or the final exam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedComponent {
    /// `None` until the student has a score for this item.
    pub score: Option<f64>,
    /// Percentage of the course total carried by this item.
    pub weight: f64,
}

impl WeightedComponent {
    pub fn new(weight: f64, score: Option<f64>) -> Self {
        Self {
            score: normalize_score(score),
            weight,
        }
    }

    pub fn unscored(weight: f64) -> Self {
        Self {
            score: None,
            weight,
        }
    }

    pub fn is_known(&self) -> bool {
        self.score.is_some()
    }

    /// Weighted share of the course total, if the score is known.
    pub fn contribution(&self) -> Option<f64> {
        self.score.map(|score| score * self.weight / 100.0)
    }
}

/// Ordered, immutable collection of weighted components.
///
/// The last slot carries the derived weight: it is never edited directly and
/// is recomputed as `100 - sum(other weights)` after every weight or count
/// change. Each editing operation returns a new set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSet {
    components: Vec<WeightedComponent>,
    #[serde(skip)]
    customized: bool,
}

impl ComponentSet {
    /// Wraps a caller-supplied snapshot, including its derived slot.
    ///
    /// Editable weights are clamped to `[0, 100]`; the derived slot is kept
    /// as given so an imbalanced snapshot is still reported as one.
    pub fn new(components: Vec<WeightedComponent>) -> Result<Self, GradingError> {
        check_count(components.len())?;
        let derived = components.len() - 1;
        let components = components
            .into_iter()
            .enumerate()
            .map(|(index, component)| {
                let weight = if index == derived {
                    component.weight
                } else {
                    clamp_percentage(component.weight)
                };
                WeightedComponent::new(weight, component.score)
            })
            .collect();

        Ok(Self {
            components,
            customized: true,
        })
    }

    /// Builds a set from the editable weights; the derived slot is appended.
    pub fn with_weights(weights: &[f64]) -> Result<Self, GradingError> {
        check_count(weights.len() + 1)?;
        let mut components: Vec<WeightedComponent> = weights
            .iter()
            .map(|weight| WeightedComponent::unscored(clamp_percentage(*weight)))
            .collect();
        components.push(WeightedComponent::unscored(0.0));

        let mut set = Self {
            components,
            customized: true,
        };
        set.recompute_derived();
        Ok(set)
    }

    /// `count` components sharing 100 evenly; the derived slot absorbs the remainder.
    pub fn evenly_weighted(count: usize) -> Self {
        let count = count.clamp(MIN_COMPONENTS, MAX_COMPONENTS);
        let mut set = Self {
            components: vec![WeightedComponent::unscored(0.0); count],
            customized: false,
        };
        set.distribute_evenly();
        set
    }

    pub(crate) fn from_defaults(weights: &[f64]) -> Self {
        let mut set = Self {
            components: weights
                .iter()
                .map(|weight| WeightedComponent::unscored(*weight))
                .collect(),
            customized: false,
        };
        set.recompute_derived();
        set
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[WeightedComponent] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<&WeightedComponent> {
        self.components.get(index)
    }

    pub fn derived_index(&self) -> usize {
        self.components.len() - 1
    }

    /// May fall outside `[0, 100]` when the editable weights are over-allocated.
    pub fn derived_weight(&self) -> f64 {
        self.components[self.derived_index()].weight
    }

    pub fn total_weight(&self) -> f64 {
        self.components.iter().map(|component| component.weight).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.derived_weight() >= 0.0 && (self.total_weight() - 100.0).abs() <= WEIGHT_TOLERANCE
    }

    /// Whether any weight has been set explicitly since the set was created.
    pub fn is_customized(&self) -> bool {
        self.customized
    }

    pub fn weights(&self) -> Vec<f64> {
        self.components.iter().map(|component| component.weight).collect()
    }

    pub fn scores(&self) -> Vec<Option<f64>> {
        self.components.iter().map(|component| component.score).collect()
    }

    pub fn unknown_indices(&self) -> Vec<usize> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, component)| !component.is_known())
            .map(|(index, _)| index)
            .collect()
    }

    /// Resizes the set. Weights are only redistributed when the count changes.
    pub fn set_count(&self, count: usize) -> Self {
        let count = count.clamp(MIN_COMPONENTS, MAX_COMPONENTS);
        if count == self.components.len() {
            return self.clone();
        }
        let mut components = vec![WeightedComponent::unscored(0.0); count];
        let kept = count.min(self.components.len());
        components[..kept].copy_from_slice(&self.components[..kept]);

        let mut next = Self {
            components,
            customized: self.customized,
        };
        if self.customized {
            next.recompute_derived();
        } else {
            next.distribute_evenly();
        }
        next
    }

    pub fn set_weight(&self, index: usize, value: f64) -> Result<Self, GradingError> {
        self.check_index(index)?;
        if index == self.derived_index() {
            return Err(GradingError::ReadOnlyWeight { index });
        }

        let mut next = self.clone();
        next.components[index].weight = clamp_percentage(value);
        next.customized = true;
        next.recompute_derived();
        Ok(next)
    }

    pub fn set_score(&self, index: usize, value: Option<f64>) -> Result<Self, GradingError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.components[index].score = normalize_score(value);
        Ok(next)
    }

    pub fn add_component(&self) -> Self {
        if self.components.len() >= MAX_COMPONENTS {
            return self.clone();
        }
        if !self.customized {
            return self.set_count(self.components.len() + 1);
        }

        let mut next = self.clone();
        if self.is_balanced() {
            let previous = next.derived_index();
            let moved = next.components[previous]
                .weight
                .clamp(0.0, ADDED_COMPONENT_WEIGHT);
            next.components[previous].weight -= moved;
        }
        next.components.push(WeightedComponent::unscored(0.0));
        next.recompute_derived();
        next
    }

    pub fn remove_component(&self) -> Self {
        if self.components.len() <= MIN_COMPONENTS {
            return self.clone();
        }
        if !self.customized {
            return self.set_count(self.components.len() - 1);
        }

        let mut next = self.clone();
        next.components.pop();
        next.recompute_derived();
        next
    }

    fn check_index(&self, index: usize) -> Result<(), GradingError> {
        if index < self.components.len() {
            Ok(())
        } else {
            Err(GradingError::IndexOutOfRange {
                index,
                len: self.components.len(),
            })
        }
    }

    fn recompute_derived(&mut self) {
        let derived = self.derived_index();
        let others: f64 = self.components[..derived]
            .iter()
            .map(|component| component.weight)
            .sum();
        self.components[derived].weight = 100.0 - others;
    }

    fn distribute_evenly(&mut self) {
        let share = (100.0 / self.components.len() as f64).floor();
        for component in self.components.iter_mut() {
            component.weight = share;
        }
        self.recompute_derived();
    }
}

fn normalize_score(value: Option<f64>) -> Option<f64> {
    value
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, 100.0))
}
