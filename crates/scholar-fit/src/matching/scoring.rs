use serde::{Deserialize, Serialize};

use super::domain::{Dimension, FeatureVector, WeightVector};
use super::explain::{explain, Contribution};
use super::normalizer::{tilt_to_winners, WeightNormalization};

/// Share of the overall fit taken from the full-weight (personality) score.
pub const PERSONALITY_BLEND: f64 = 0.6;
/// Share of the overall fit taken from the top-three (winner) score.
pub const WINNER_BLEND: f64 = 0.4;
pub const TOP_CONTRIBUTOR_COUNT: usize = 3;

/// Stateless scorer; the only dial is how raw weights are normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitScorer {
    normalization: WeightNormalization,
}

impl FitScorer {
    pub fn new(normalization: WeightNormalization) -> Self {
        Self { normalization }
    }

    pub fn normalization(&self) -> WeightNormalization {
        self.normalization
    }

    /// Weights as the scorer sees them after the normalization discipline.
    pub fn effective_weights(&self, weights: &WeightVector) -> WeightVector {
        self.normalization.apply(weights)
    }

    pub fn score(&self, features: &FeatureVector, weights: &WeightVector) -> FitResult {
        let effective = self.effective_weights(weights);
        let personality_fit = personality_fit(features, &effective);
        let winner_fit = winner_fit(features, &effective);

        let top_contributors = explain(features, &effective)
            .into_iter()
            .filter(|entry| entry.contribution > 0.0)
            .take(TOP_CONTRIBUTOR_COUNT)
            .collect();

        FitResult {
            personality_fit,
            winner_fit,
            overall_fit: blend(personality_fit, winner_fit),
            top_contributors,
        }
    }

    pub fn explain(&self, features: &FeatureVector, weights: &WeightVector) -> Vec<Contribution> {
        explain(features, &self.effective_weights(weights))
    }
}

/// `100 * Σ weight · feature`; unbounded above for raw weights that sum past one.
pub fn personality_fit(features: &FeatureVector, weights: &WeightVector) -> f64 {
    100.0 * weights.values().dot(features.values())
}

/// Personality fit against the winner-tilted weights, always within `[0, 100]`.
pub fn winner_fit(features: &FeatureVector, weights: &WeightVector) -> f64 {
    100.0 * tilt_to_winners(weights).values().dot(features.values())
}

pub fn blend(personality_fit: f64, winner_fit: f64) -> f64 {
    PERSONALITY_BLEND * personality_fit + WINNER_BLEND * winner_fit
}

/// Unrounded fit for a single student/scholarship pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub personality_fit: f64,
    pub winner_fit: f64,
    pub overall_fit: f64,
    pub top_contributors: Vec<Contribution>,
}

impl FitResult {
    /// Rounds for display. This is the only place fit values are rounded.
    pub fn view(&self) -> FitScoreView {
        FitScoreView {
            personality_fit: display_score(self.personality_fit),
            winner_fit: display_score(self.winner_fit),
            overall_fit: display_score(self.overall_fit),
            top_contributors: self
                .top_contributors
                .iter()
                .map(|entry| entry.dimension)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitScoreView {
    pub personality_fit: i64,
    pub winner_fit: i64,
    pub overall_fit: i64,
    pub top_contributors: Vec<Dimension>,
}

pub fn display_score(value: f64) -> i64 {
    value.round() as i64
}
