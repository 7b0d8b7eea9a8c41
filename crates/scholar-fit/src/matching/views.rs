//! Display projections handed to presentation code.
//!
//! Every rounding of engine output happens here, once, after all arithmetic
//! is finished.

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Dimension, ScholarshipId, StudentId};
use super::explain::Contribution;
use super::ranking::RecommendationSet;
use super::scoring::{display_score, FitScoreView};
use super::service::FitReport;
use super::statistics::DemandFrequency;

pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionView {
    pub dimension: Dimension,
    pub student_value: f64,
    pub weight: f64,
    pub contribution: f64,
    pub gap: f64,
    pub note: String,
}

impl From<&Contribution> for ContributionView {
    fn from(entry: &Contribution) -> Self {
        Self {
            dimension: entry.dimension,
            student_value: round_hundredths(entry.student_value),
            weight: round_hundredths(entry.weight),
            contribution: round_hundredths(entry.contribution),
            gap: round_hundredths(entry.gap),
            note: entry.note(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReportView {
    pub student_id: StudentId,
    pub scholarship_id: ScholarshipId,
    pub scholarship_name: String,
    pub normalization: &'static str,
    pub scores: FitScoreView,
    pub contributions: Vec<ContributionView>,
}

impl FitReport {
    pub fn view(&self) -> FitReportView {
        FitReportView {
            student_id: self.student_id.clone(),
            scholarship_id: self.scholarship_id.clone(),
            scholarship_name: self.scholarship_name.clone(),
            normalization: self.normalization.label(),
            scores: self.fit.view(),
            contributions: self.contributions.iter().map(ContributionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntryView {
    pub rank: usize,
    pub scholarship_id: ScholarshipId,
    pub name: String,
    pub category: String,
    pub overall_fit: i64,
    pub top_contributors: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationListView {
    pub student_id: StudentId,
    pub source: &'static str,
    pub recommendations: Vec<RecommendationEntryView>,
}

impl RecommendationSet {
    pub fn view(&self, student_id: &StudentId) -> RecommendationListView {
        let recommendations = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| RecommendationEntryView {
                rank: index + 1,
                scholarship_id: entry.scholarship.id.clone(),
                name: entry.scholarship.name.clone(),
                category: entry.scholarship.category.clone(),
                overall_fit: display_score(entry.overall_fit()),
                top_contributors: entry
                    .fit
                    .top_contributors
                    .iter()
                    .map(|contribution| contribution.dimension)
                    .collect(),
                deadline: entry.scholarship.deadline,
            })
            .collect();

        RecommendationListView {
            student_id: student_id.clone(),
            source: self.source.label(),
            recommendations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandEntryView {
    pub dimension: Dimension,
    pub title: &'static str,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandView {
    pub corpus_size: usize,
    pub dimensions: Vec<DemandEntryView>,
}

impl DemandFrequency {
    /// Most demanded first.
    pub fn view(&self) -> DemandView {
        DemandView {
            corpus_size: self.corpus_size,
            dimensions: self
                .ranked()
                .into_iter()
                .map(|(dimension, percentage)| DemandEntryView {
                    dimension,
                    title: dimension.title(),
                    percentage: round_hundredths(percentage),
                })
                .collect(),
        }
    }
}
