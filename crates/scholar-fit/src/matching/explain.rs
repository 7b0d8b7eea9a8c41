use serde::{Deserialize, Serialize};

use super::domain::{Dimension, FeatureVector, WeightVector};

/// Per-dimension share of a fit score, used to explain a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub dimension: Dimension,
    pub student_value: f64,
    pub weight: f64,
    /// `student_value * weight`.
    pub contribution: f64,
    /// `weight - student_value`; positive when the scholarship asks for more than the student shows.
    pub gap: f64,
}

impl Contribution {
    fn for_dimension(dimension: Dimension, features: &FeatureVector, weights: &WeightVector) -> Self {
        let student_value = features.get(dimension);
        let weight = weights.get(dimension);
        Self {
            dimension,
            student_value,
            weight,
            contribution: student_value * weight,
            gap: weight - student_value,
        }
    }

    pub fn note(&self) -> String {
        if self.gap > 0.0 {
            format!(
                "{} contributes {:.2}; strengthen by {:.2} to meet weight {:.2}",
                self.dimension.title(),
                self.contribution,
                self.gap,
                self.weight
            )
        } else {
            format!(
                "{} contributes {:.2}; exceeds weight {:.2}",
                self.dimension.title(),
                self.contribution,
                self.weight
            )
        }
    }
}

/// Decomposes a match into one entry per dimension, largest contribution first.
///
/// Equal contributions keep canonical dimension order, so identical inputs
/// always produce identical output ordering.
pub fn explain(features: &FeatureVector, weights: &WeightVector) -> Vec<Contribution> {
    let mut contributions: Vec<Contribution> = Dimension::ALL
        .into_iter()
        .map(|dimension| Contribution::for_dimension(dimension, features, weights))
        .collect();

    contributions.sort_by(|left, right| right.contribution.total_cmp(&left.contribution));
    contributions
}
