use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_fit::matching::{
    DirectoryError, ScholarshipCatalog, ScholarshipRecord, StudentDirectory, StudentId,
    StudentRecord,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentDirectory {
    records: Arc<Mutex<HashMap<StudentId, StudentRecord>>>,
}

impl InMemoryStudentDirectory {
    pub(crate) fn with_students(students: Vec<StudentRecord>) -> Self {
        let directory = Self::default();
        if let Ok(mut guard) = directory.records.lock() {
            guard.extend(
                students
                    .into_iter()
                    .map(|student| (student.id.clone(), student)),
            );
        }
        directory
    }
}

impl StudentDirectory for InMemoryStudentDirectory {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, DirectoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| DirectoryError::Unavailable("student directory lock poisoned".into()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Catalog holding scholarships in load order; ranking ties fall back to it.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScholarshipCatalog {
    records: Arc<Mutex<Vec<ScholarshipRecord>>>,
}

impl InMemoryScholarshipCatalog {
    pub(crate) fn with_scholarships(scholarships: Vec<ScholarshipRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(scholarships)),
        }
    }
}

impl ScholarshipCatalog for InMemoryScholarshipCatalog {
    fn list(&self) -> Result<Vec<ScholarshipRecord>, DirectoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| DirectoryError::Unavailable("scholarship catalog lock poisoned".into()))?;
        Ok(guard.clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
