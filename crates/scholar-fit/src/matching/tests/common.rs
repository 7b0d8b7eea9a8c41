use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    Dimension, FeatureVector, ScholarshipId, ScholarshipRecord, StudentId, StudentRecord,
    WeightVector,
};
use crate::matching::repository::{DirectoryError, ScholarshipCatalog, StudentDirectory};
use crate::matching::{match_router, MatchService, MatchingConfig};

pub(super) fn sample_features() -> FeatureVector {
    [
        (Dimension::Academics, 0.8),
        (Dimension::Leadership, 0.6),
        (Dimension::Community, 0.5),
        (Dimension::Need, 0.2),
        (Dimension::Innovation, 0.7),
        (Dimension::Research, 0.7),
        (Dimension::Adversity, 0.4),
    ]
    .into_iter()
    .collect()
}

/// Weight shape of a typical merit award; sums to 3.1, not 1.
pub(super) fn merit_weights() -> WeightVector {
    [
        (Dimension::Academics, 0.9),
        (Dimension::Leadership, 0.7),
        (Dimension::Community, 0.3),
        (Dimension::Need, 0.1),
        (Dimension::Innovation, 0.35),
        (Dimension::Research, 0.6),
        (Dimension::Adversity, 0.15),
    ]
    .into_iter()
    .collect()
}

pub(super) fn weights(pairs: &[(Dimension, f64)]) -> WeightVector {
    pairs.iter().copied().collect()
}

pub(super) fn scholarship(
    id: &str,
    weights: WeightVector,
    priorities: &[Dimension],
) -> ScholarshipRecord {
    ScholarshipRecord {
        id: ScholarshipId(id.to_string()),
        name: format!("{id} scholarship"),
        category: "General".to_string(),
        weights,
        priorities: priorities.to_vec(),
        deadline: None,
    }
}

pub(super) fn student(id: &str, recommended: &[&str]) -> StudentRecord {
    StudentRecord {
        id: StudentId(id.to_string()),
        name: format!("Student {id}"),
        features: sample_features(),
        recommended_scholarship_ids: recommended
            .iter()
            .map(|id| ScholarshipId(id.to_string()))
            .collect(),
    }
}

/// Four scholarships with distinct overall fits for `sample_features`.
pub(super) fn corpus() -> Vec<ScholarshipRecord> {
    vec![
        scholarship(
            "need-grant",
            weights(&[(Dimension::Need, 0.8), (Dimension::Adversity, 0.6)]),
            &[Dimension::Need, Dimension::Adversity],
        ),
        scholarship(
            "merit",
            merit_weights(),
            &[Dimension::Academics, Dimension::Leadership],
        ),
        scholarship(
            "stem-research",
            weights(&[
                (Dimension::Research, 0.9),
                (Dimension::Innovation, 0.8),
                (Dimension::Academics, 0.5),
            ]),
            &[Dimension::Research, Dimension::Innovation, Dimension::Academics],
        ),
        scholarship(
            "civic",
            weights(&[(Dimension::Community, 0.7), (Dimension::Leadership, 0.4)]),
            &[Dimension::Community],
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryStudents {
    records: Mutex<HashMap<StudentId, StudentRecord>>,
}

impl MemoryStudents {
    pub(super) fn with(records: Vec<StudentRecord>) -> Self {
        let students = Self::default();
        {
            let mut guard = students.records.lock().expect("student mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        students
    }
}

impl StudentDirectory for MemoryStudents {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, DirectoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    records: Vec<ScholarshipRecord>,
}

impl MemoryCatalog {
    pub(super) fn with(records: Vec<ScholarshipRecord>) -> Self {
        Self { records }
    }
}

impl ScholarshipCatalog for MemoryCatalog {
    fn list(&self) -> Result<Vec<ScholarshipRecord>, DirectoryError> {
        Ok(self.records.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl ScholarshipCatalog for UnavailableCatalog {
    fn list(&self) -> Result<Vec<ScholarshipRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) type TestService = MatchService<MemoryStudents, MemoryCatalog>;

pub(super) fn build_service(
    students: Vec<StudentRecord>,
    scholarships: Vec<ScholarshipRecord>,
) -> Arc<TestService> {
    Arc::new(MatchService::new(
        Arc::new(MemoryStudents::with(students)),
        Arc::new(MemoryCatalog::with(scholarships)),
        MatchingConfig::default(),
    ))
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    match_router(service)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
