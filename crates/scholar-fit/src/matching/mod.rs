//! Fit scoring and scholarship recommendation.
//!
//! The scoring core (`normalizer`, `scoring`, `explain`, `ranking`,
//! `statistics`) is pure and synchronous: every function is a deterministic
//! projection of its arguments and holds no state between calls. The
//! `intake`, `repository`, `service`, and `router` modules wrap that core for
//! collaborators that own persistence and presentation.

pub mod config;
pub mod domain;
pub mod explain;
pub mod intake;
pub mod normalizer;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod statistics;
pub mod views;

#[cfg(test)]
mod tests;

pub use config::MatchingConfig;
pub use domain::{
    Dimension, DimensionVector, FeatureVector, ScholarshipId, ScholarshipRecord, StudentId,
    StudentRecord, UnknownDimension, WeightVector,
};
pub use explain::{explain, Contribution};
pub use intake::{IntakeError, IntakeGuard, ScholarshipSubmission, StudentSubmission};
pub use normalizer::{tilt_to_winners, WeightNormalization};
pub use ranking::{
    RankedScholarship, RecommendationRanker, RecommendationSet, RecommendationSource,
};
pub use repository::{DirectoryError, ScholarshipCatalog, StudentDirectory};
pub use router::match_router;
pub use scoring::{FitResult, FitScoreView, FitScorer};
pub use service::{FitReport, MatchService, MatchServiceError};
pub use statistics::{demand_frequency, DemandFrequency};
pub use views::{DemandView, FitReportView, RecommendationListView};
