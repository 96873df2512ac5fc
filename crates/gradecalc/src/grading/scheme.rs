use serde::{Deserialize, Serialize};

use super::component::ComponentSet;

/// Preconfigured component layouts. Both share the same set semantics; only
/// the default counts and weights differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    /// Midterm exams followed by a final exam.
    #[default]
    Midterm,
    /// Committee assessments; the last committee carries the derived weight.
    Committee,
}

impl WeightingScheme {
    pub const fn ordered() -> [Self; 2] {
        [Self::Midterm, Self::Committee]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Midterm => "Midterm",
            Self::Committee => "Committee",
        }
    }

    pub const fn default_weights(self) -> &'static [f64] {
        match self {
            Self::Midterm => &[40.0, 60.0],
            Self::Committee => &[30.0, 30.0, 40.0],
        }
    }

    pub fn default_set(self) -> ComponentSet {
        ComponentSet::from_defaults(self.default_weights())
    }

    /// Display name for the component at `index` in a set of `len`.
    pub fn component_name(self, index: usize, len: usize) -> String {
        match self {
            Self::Midterm if index + 1 == len => "Final".to_string(),
            Self::Midterm => format!("Midterm {}", index + 1),
            Self::Committee => format!("Committee {}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets_are_balanced() {
        for scheme in WeightingScheme::ordered() {
            let set = scheme.default_set();
            assert!(set.is_balanced(), "{} defaults balanced", scheme.label());
            assert!(!set.is_customized());
            assert!(set.unknown_indices().len() == set.len());
        }
    }

    #[test]
    fn midterm_defaults_put_sixty_on_the_final() {
        let set = WeightingScheme::Midterm.default_set();
        assert_eq!(set.weights(), vec![40.0, 60.0]);
        assert_eq!(set.derived_weight(), 60.0);
    }

    #[test]
    fn names_components_per_scheme() {
        assert_eq!(WeightingScheme::Midterm.component_name(0, 3), "Midterm 1");
        assert_eq!(WeightingScheme::Midterm.component_name(2, 3), "Final");
        assert_eq!(WeightingScheme::Committee.component_name(2, 3), "Committee 3");
    }
}
