use serde::{Deserialize, Serialize};

use super::normalizer::WeightNormalization;

/// Dials the service layer exposes around the fixed scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weight_normalization: WeightNormalization,
    pub default_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weight_normalization: WeightNormalization::Raw,
            default_limit: 5,
        }
    }
}
