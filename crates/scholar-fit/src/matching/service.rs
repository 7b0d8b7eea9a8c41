use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::config::MatchingConfig;
use super::domain::{ScholarshipId, ScholarshipRecord, StudentId, StudentRecord};
use super::explain::Contribution;
use super::intake::{IntakeError, IntakeGuard, ScholarshipSubmission, StudentSubmission};
use super::normalizer::WeightNormalization;
use super::ranking::{RecommendationRanker, RecommendationSet};
use super::repository::{DirectoryError, ScholarshipCatalog, StudentDirectory};
use super::scoring::{FitResult, FitScorer};
use super::statistics::{demand_frequency, DemandFrequency};

/// Fit and contribution breakdown for one student/scholarship pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub student_id: StudentId,
    pub scholarship_id: ScholarshipId,
    pub scholarship_name: String,
    pub normalization: WeightNormalization,
    pub fit: FitResult,
    pub contributions: Vec<Contribution>,
}

/// Service composing the profile and catalog collaborators with the engine.
pub struct MatchService<S, C> {
    students: Arc<S>,
    catalog: Arc<C>,
    guard: IntakeGuard,
    ranker: RecommendationRanker,
    config: MatchingConfig,
}

impl<S, C> MatchService<S, C>
where
    S: StudentDirectory + 'static,
    C: ScholarshipCatalog + 'static,
{
    pub fn new(students: Arc<S>, catalog: Arc<C>, config: MatchingConfig) -> Self {
        let scorer = FitScorer::new(config.weight_normalization);
        Self {
            students,
            catalog,
            guard: IntakeGuard,
            ranker: RecommendationRanker::new(scorer),
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn scorer(&self) -> &FitScorer {
        self.ranker.scorer()
    }

    /// Score a stored student against a stored scholarship.
    pub fn score(
        &self,
        student_id: &StudentId,
        scholarship_id: &ScholarshipId,
    ) -> Result<FitReport, MatchServiceError> {
        let student = self.student(student_id)?;
        let scholarship = self
            .catalog
            .fetch(scholarship_id)?
            .ok_or_else(|| MatchServiceError::ScholarshipNotFound(scholarship_id.clone()))?;

        Ok(self.report(&student, &scholarship))
    }

    /// Score inline submissions that have not been stored by any collaborator.
    pub fn evaluate(
        &self,
        student: StudentSubmission,
        scholarship: ScholarshipSubmission,
    ) -> Result<FitReport, MatchServiceError> {
        let student = self.guard.student_from_submission(student)?;
        let scholarship = self.guard.scholarship_from_submission(scholarship)?;
        Ok(self.report(&student, &scholarship))
    }

    /// Rank the catalog for a student. `as_of` drops scholarships whose deadline has passed.
    pub fn recommend(
        &self,
        student_id: &StudentId,
        limit: Option<usize>,
        as_of: Option<NaiveDate>,
    ) -> Result<RecommendationSet, MatchServiceError> {
        let student = self.student(student_id)?;
        let mut corpus = self.catalog.list()?;
        if let Some(date) = as_of {
            corpus.retain(|scholarship| scholarship.is_open_on(date));
        }

        let limit = limit.unwrap_or(self.config.default_limit);
        let recommendations = self.ranker.recommend(&student, &corpus, limit);

        debug!(
            student = %student.id,
            corpus = corpus.len(),
            limit,
            returned = recommendations.len(),
            source = recommendations.source.label(),
            "ranked scholarships"
        );

        Ok(recommendations)
    }

    pub fn demand(&self) -> Result<DemandFrequency, MatchServiceError> {
        let corpus = self.catalog.list()?;
        Ok(demand_frequency(&corpus))
    }

    fn student(&self, student_id: &StudentId) -> Result<StudentRecord, MatchServiceError> {
        self.students
            .fetch(student_id)?
            .ok_or_else(|| MatchServiceError::StudentNotFound(student_id.clone()))
    }

    fn report(&self, student: &StudentRecord, scholarship: &ScholarshipRecord) -> FitReport {
        let scorer = self.scorer();
        let fit = scorer.score(&student.features, &scholarship.weights);
        let contributions = scorer.explain(&student.features, &scholarship.weights);

        debug!(
            student = %student.id,
            scholarship = %scholarship.id,
            overall_fit = fit.overall_fit,
            "scored scholarship fit"
        );

        FitReport {
            student_id: student.id.clone(),
            scholarship_id: scholarship.id.clone(),
            scholarship_name: scholarship.name.clone(),
            normalization: scorer.normalization(),
            fit,
            contributions,
        }
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("scholarship {0} not found")]
    ScholarshipNotFound(ScholarshipId),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
