use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{StudentInput, StudentRecord};
use super::errors::StudentError;
use super::repository::StudentRepository;

/// Student business service independent of web framework.
///
/// All three protocol adapters share one instance; it holds no state of its
/// own beyond the repository handle.
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new student and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, domain::StudentInput, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let input = StudentInput { name: "John Doe".into(), age: 15, grade: "A".into() };
    /// let record = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(record.name, "John Doe");
    /// assert!(record.id >= 1);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: StudentInput) -> Result<StudentRecord, StudentError> {
        let record = self.repo.save(&input).await?;
        info!(student_id = record.id, "student_created");
        Ok(record)
    }

    /// Fetch a student by id, or fail with `NotFound`.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let err = tokio_test::block_on(svc.get_by_id(999999)).unwrap_err();
    /// assert!(err.to_string().contains("999999"));
    /// ```
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<StudentRecord, StudentError> {
        match self.repo.find_by_id(id).await? {
            Some(record) => Ok(record),
            None => Err(StudentError::NotFound(id)),
        }
    }
}
