use sea_orm::DatabaseConnection;

use crate::student::domain::{StudentInput, StudentRecord};
use crate::student::errors::StudentError;
use crate::student::repository::StudentRepository;

pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn save(&self, input: &StudentInput) -> Result<StudentRecord, StudentError> {
        let created = models::student::create(&self.db, &input.name, input.age, &input.grade)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        Ok(StudentRecord { id: created.id, name: created.name, age: created.age, grade: created.grade })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentError> {
        let found = models::student::find_by_id(&self.db, id)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        Ok(found.map(|s| StudentRecord { id: s.id, name: s.name, age: s.age, grade: s.grade }))
    }
}
