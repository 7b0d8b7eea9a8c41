use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{ScholarshipRecord, StudentRecord};
use super::scoring::{FitResult, FitScorer};

/// Pre-declared recommendations only take precedence once this many resolve.
pub const MINIMUM_PRE_DECLARED: usize = 3;

/// How a recommendation list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    PreDeclared,
    Computed,
}

impl RecommendationSource {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendationSource::PreDeclared => "pre_declared",
            RecommendationSource::Computed => "computed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedScholarship {
    pub scholarship: ScholarshipRecord,
    pub fit: FitResult,
}

impl RankedScholarship {
    pub fn overall_fit(&self) -> f64 {
        self.fit.overall_fit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub source: RecommendationSource,
    pub entries: Vec<RankedScholarship>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Orders a scholarship corpus for one student.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationRanker {
    scorer: FitScorer,
}

impl RecommendationRanker {
    pub fn new(scorer: FitScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &FitScorer {
        &self.scorer
    }

    /// Returns at most `limit` scholarships.
    ///
    /// When the student's pre-declared ids resolve to at least
    /// [`MINIMUM_PRE_DECLARED`] corpus entries, those are returned in their
    /// declared order. A repeated id counts once toward that minimum.
    /// Otherwise every scholarship is scored and stable-sorted
    /// by overall fit, so equal scores keep corpus order.
    pub fn recommend(
        &self,
        student: &StudentRecord,
        corpus: &[ScholarshipRecord],
        limit: usize,
    ) -> RecommendationSet {
        if let Some(mut entries) = self.resolve_pre_declared(student, corpus) {
            entries.truncate(limit);
            return RecommendationSet {
                source: RecommendationSource::PreDeclared,
                entries,
            };
        }

        let mut entries: Vec<RankedScholarship> = corpus
            .iter()
            .map(|scholarship| self.rank(student, scholarship))
            .collect();
        entries.sort_by(|left, right| right.overall_fit().total_cmp(&left.overall_fit()));
        entries.truncate(limit);

        RecommendationSet {
            source: RecommendationSource::Computed,
            entries,
        }
    }

    fn resolve_pre_declared(
        &self,
        student: &StudentRecord,
        corpus: &[ScholarshipRecord],
    ) -> Option<Vec<RankedScholarship>> {
        if student.recommended_scholarship_ids.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        let resolved: Vec<RankedScholarship> = student
            .recommended_scholarship_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| corpus.iter().find(|scholarship| &scholarship.id == id))
            .map(|scholarship| self.rank(student, scholarship))
            .collect();

        (resolved.len() >= MINIMUM_PRE_DECLARED).then_some(resolved)
    }

    fn rank(&self, student: &StudentRecord, scholarship: &ScholarshipRecord) -> RankedScholarship {
        RankedScholarship {
            scholarship: scholarship.clone(),
            fit: self.scorer.score(&student.features, &scholarship.weights),
        }
    }
}
