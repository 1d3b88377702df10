use thiserror::Error;

/// Business errors for student workflows
#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Student not found with id: {0}")]
    NotFound(i64),
    #[error("repository error: {0}")]
    Repository(String),
}

impl StudentError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StudentError::NotFound(_) => 1001,
            StudentError::Repository(_) => 1200,
        }
    }
}
