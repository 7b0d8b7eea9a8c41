use super::domain::{ScholarshipId, ScholarshipRecord, StudentId, StudentRecord};

/// Read access to student profiles owned by the profile collaborator.
pub trait StudentDirectory: Send + Sync {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, DirectoryError>;
}

/// Read access to the scholarship corpus owned by the catalog collaborator.
pub trait ScholarshipCatalog: Send + Sync {
    /// Full corpus in catalog order; ranking ties fall back to this order.
    fn list(&self) -> Result<Vec<ScholarshipRecord>, DirectoryError>;

    fn fetch(&self, id: &ScholarshipId) -> Result<Option<ScholarshipRecord>, DirectoryError> {
        Ok(self.list()?.into_iter().find(|record| &record.id == id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
