use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Dimension, WeightVector};

/// Number of dimensions a typical winner is judged on.
pub const WINNER_DIMENSION_COUNT: usize = 3;

/// Discipline applied to raw scholarship weights before scoring.
///
/// `Raw` keeps the catalog weights untouched, so personality fit is bounded by
/// `100 * Σ weight` rather than 100. `SumToOne` rescales every vector to a unit
/// sum first, which bounds every score to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightNormalization {
    #[default]
    Raw,
    SumToOne,
}

impl WeightNormalization {
    pub const fn label(self) -> &'static str {
        match self {
            WeightNormalization::Raw => "raw",
            WeightNormalization::SumToOne => "sum_to_one",
        }
    }

    pub fn apply(self, weights: &WeightVector) -> WeightVector {
        match self {
            WeightNormalization::Raw => *weights,
            WeightNormalization::SumToOne => normalize_to_unit_sum(weights),
        }
    }
}

impl fmt::Display for WeightNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weight normalization '{0}' (expected raw or sum_to_one)")]
pub struct UnknownNormalization(pub String);

impl FromStr for WeightNormalization {
    type Err = UnknownNormalization;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "raw" => Ok(Self::Raw),
            "sum_to_one" | "unit" => Ok(Self::SumToOne),
            _ => Err(UnknownNormalization(raw.trim().to_string())),
        }
    }
}

/// Isolates the three heaviest dimensions and rescales them to sum to one.
///
/// Ties are resolved by canonical dimension order. A vector whose top three
/// weights sum to zero yields the all-zero vector, which scores zero for every
/// student.
pub fn tilt_to_winners(weights: &WeightVector) -> WeightVector {
    let mut ranked = Dimension::ALL;
    // stable: equal weights keep canonical order
    ranked.sort_by(|left, right| weights.get(*right).total_cmp(&weights.get(*left)));

    let winners = &ranked[..WINNER_DIMENSION_COUNT];
    // winners[0] is the heaviest; scaling by it keeps the sum finite for huge weights
    let heaviest = weights.get(winners[0]);
    if heaviest <= 0.0 || !heaviest.is_finite() {
        return WeightVector::ZERO;
    }

    let scaled = |dimension: Dimension| weights.get(dimension) / heaviest;
    let total: f64 = winners.iter().map(|&dimension| scaled(dimension)).sum();

    winners
        .iter()
        .map(|&dimension| (dimension, scaled(dimension) / total))
        .collect()
}

/// Rescales weights so they sum to one; the all-zero vector is returned as-is.
pub fn normalize_to_unit_sum(weights: &WeightVector) -> WeightVector {
    let total = weights.total();
    if total <= 0.0 || !total.is_finite() {
        return WeightVector::ZERO;
    }

    WeightVector(weights.values().map(|_, weight| weight / total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::DimensionVector;

    fn weights(pairs: &[(Dimension, f64)]) -> WeightVector {
        pairs.iter().copied().collect()
    }

    #[test]
    fn tilt_keeps_top_three_and_renormalizes() {
        let tilted = tilt_to_winners(&weights(&[
            (Dimension::Academics, 0.9),
            (Dimension::Leadership, 0.7),
            (Dimension::Community, 0.3),
            (Dimension::Need, 0.1),
            (Dimension::Innovation, 0.35),
            (Dimension::Research, 0.6),
            (Dimension::Adversity, 0.15),
        ]));

        assert!((tilted.get(Dimension::Academics) - 0.9 / 2.2).abs() < 1e-12);
        assert!((tilted.get(Dimension::Leadership) - 0.7 / 2.2).abs() < 1e-12);
        assert!((tilted.get(Dimension::Research) - 0.6 / 2.2).abs() < 1e-12);
        assert_eq!(tilted.get(Dimension::Innovation), 0.0);
        assert_eq!(tilted.get(Dimension::Community), 0.0);
        assert!((tilted.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tilt_breaks_ties_by_canonical_order() {
        let tilted = tilt_to_winners(&WeightVector(DimensionVector::from_fn(|_| 0.5)));

        assert!(tilted.get(Dimension::Academics) > 0.0);
        assert!(tilted.get(Dimension::Leadership) > 0.0);
        assert!(tilted.get(Dimension::Community) > 0.0);
        assert_eq!(tilted.get(Dimension::Need), 0.0);
        assert_eq!(tilted.get(Dimension::Adversity), 0.0);
    }

    #[test]
    fn tilt_of_zero_weights_is_zero() {
        assert_eq!(tilt_to_winners(&WeightVector::ZERO), WeightVector::ZERO);
    }

    #[test]
    fn tilt_with_single_nonzero_weight_concentrates_on_it() {
        let tilted = tilt_to_winners(&weights(&[(Dimension::Need, 0.4)]));
        assert_eq!(tilted.get(Dimension::Need), 1.0);
        assert_eq!(tilted.total(), 1.0);
    }

    #[test]
    fn tilt_stays_finite_for_extreme_weights() {
        let tilted = tilt_to_winners(&WeightVector(DimensionVector::from_fn(|_| f64::MAX)));

        for dimension in [Dimension::Academics, Dimension::Leadership, Dimension::Community] {
            assert!((tilted.get(dimension) - 1.0 / 3.0).abs() < 1e-12);
        }
        assert_eq!(tilted.get(Dimension::Need), 0.0);
        assert!((tilted.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_sum_normalization_preserves_proportions() {
        let normalized = normalize_to_unit_sum(&weights(&[
            (Dimension::Academics, 3.0),
            (Dimension::Need, 1.0),
        ]));
        assert_eq!(normalized.get(Dimension::Academics), 0.75);
        assert_eq!(normalized.get(Dimension::Need), 0.25);
        assert_eq!(
            normalize_to_unit_sum(&WeightVector::ZERO),
            WeightVector::ZERO
        );
    }

    #[test]
    fn normalization_parses_from_config_strings() {
        assert_eq!("RAW".parse::<WeightNormalization>(), Ok(WeightNormalization::Raw));
        assert_eq!("sum-to-one".parse::<WeightNormalization>(), Ok(WeightNormalization::SumToOne));
        assert!("softmax".parse::<WeightNormalization>().is_err());
    }
}
