use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    Dimension, DimensionVector, FeatureVector, ScholarshipId, ScholarshipRecord, StudentId,
    StudentRecord, WeightVector,
};

const DEFAULT_CATEGORY: &str = "General";

/// Validation errors raised while admitting records into the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("{vector} value for {dimension} is not a finite number")]
    NonFiniteValue {
        vector: &'static str,
        dimension: Dimension,
    },
}

/// Student profile as received from the profile collaborator, before sanitizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSubmission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub features: DimensionVector,
    #[serde(default)]
    pub recommended_scholarship_ids: Vec<String>,
}

/// Scholarship as received from the catalog collaborator, before sanitizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipSubmission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub weights: DimensionVector,
    #[serde(default)]
    pub priorities: Vec<Dimension>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Boundary that enforces the value ranges the scorer relies on.
///
/// Features are clamped into `[0, 1]` and weights floored at zero here, so the
/// scoring routines never branch on malformed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn student_from_submission(
        &self,
        submission: StudentSubmission,
    ) -> Result<StudentRecord, IntakeError> {
        let id = required("student id", submission.id)?;
        let name = required("student name", submission.name)?;
        ensure_finite("feature", &submission.features)?;

        let features = FeatureVector(submission.features.map(|_, value| value.clamp(0.0, 1.0)));
        let recommended_scholarship_ids = submission
            .recommended_scholarship_ids
            .into_iter()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(ScholarshipId)
            .collect();

        Ok(StudentRecord {
            id: StudentId(id),
            name,
            features,
            recommended_scholarship_ids,
        })
    }

    pub fn scholarship_from_submission(
        &self,
        submission: ScholarshipSubmission,
    ) -> Result<ScholarshipRecord, IntakeError> {
        let id = required("scholarship id", submission.id)?;
        let name = required("scholarship name", submission.name)?;
        ensure_finite("weight", &submission.weights)?;

        let category = match submission.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            category => category.to_string(),
        };
        let weights = WeightVector(submission.weights.map(|_, value| value.max(0.0)));

        let mut priorities: Vec<Dimension> = Vec::with_capacity(submission.priorities.len());
        for dimension in submission.priorities {
            if !priorities.contains(&dimension) {
                priorities.push(dimension);
            }
        }

        Ok(ScholarshipRecord {
            id: ScholarshipId(id),
            name,
            category,
            weights,
            priorities,
            deadline: submission.deadline,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::BlankField { field });
    }
    Ok(trimmed.to_string())
}

fn ensure_finite(vector: &'static str, values: &DimensionVector) -> Result<(), IntakeError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((dimension, _)) => Err(IntakeError::NonFiniteValue { vector, dimension }),
        None => Ok(()),
    }
}
