use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Dimension, ScholarshipRecord};
use super::views::round_hundredths;

/// Share of a corpus, in percent, that lists each dimension as a priority.
///
/// Built from declared priorities only; numeric weights play no part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandFrequency {
    pub corpus_size: usize,
    pub percentages: BTreeMap<Dimension, f64>,
}

impl DemandFrequency {
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.percentages.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Percentages rounded to two decimals for display.
    pub fn rounded(&self) -> BTreeMap<Dimension, f64> {
        self.percentages
            .iter()
            .map(|(dimension, value)| (*dimension, round_hundredths(*value)))
            .collect()
    }

    /// Dimensions by descending demand, canonical order on ties.
    pub fn ranked(&self) -> Vec<(Dimension, f64)> {
        let mut ranked: Vec<(Dimension, f64)> = Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, self.get(dimension)))
            .collect();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked
    }
}

pub fn demand_frequency(corpus: &[ScholarshipRecord]) -> DemandFrequency {
    let denominator = corpus.len().max(1) as f64;

    let percentages = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let count = corpus
                .iter()
                .filter(|scholarship| scholarship.prioritizes(dimension))
                .count();
            (dimension, 100.0 * count as f64 / denominator)
        })
        .collect();

    DemandFrequency {
        corpus_size: corpus.len(),
        percentages,
    }
}
