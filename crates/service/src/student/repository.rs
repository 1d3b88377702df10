use async_trait::async_trait;

use super::domain::{StudentInput, StudentRecord};
use super::errors::StudentError;

/// Repository abstraction for student persistence.
///
/// The store assigns identifiers on first save; callers never pick them.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn save(&self, input: &StudentInput) -> Result<StudentRecord, StudentError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockStudentRepository {
        rows: Mutex<HashMap<i64, StudentRecord>>, // key: id
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn save(&self, input: &StudentInput) -> Result<StudentRecord, StudentError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let record = StudentRecord {
                id: *next,
                name: input.name.clone(),
                age: input.age,
                grade: input.grade.clone(),
            };
            self.rows.lock().unwrap().insert(record.id, record.clone());
            Ok(record)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.get(&id).cloned())
        }
    }
}
