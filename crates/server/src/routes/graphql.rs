use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, Object, Result as GqlResult, Schema,
    SimpleObject,
};
use axum::extract::State;
use axum::Json;

use common::types::ErrorBody;
use service::student::domain::StudentInput;
use service::student::domain::StudentRecord;
use service::student::errors::StudentError;
use service::student::StudentService;

use crate::state::ServerState;

pub type StudentSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// GraphQL view of a student record.
#[derive(SimpleObject)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub grade: String,
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Self { id: record.id, name: record.name, age: record.age, grade: record.grade }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Look up one student; missing ids surface as a NOT_FOUND error.
    async fn student_by_id(&self, ctx: &Context<'_>, id: i64) -> GqlResult<Student> {
        let service = ctx.data::<Arc<StudentService>>()?;
        service.get_by_id(id).await.map(Student::from).map_err(|e| to_graphql_error(&e))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_student(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: i32,
        grade: String,
    ) -> GqlResult<Student> {
        let service = ctx.data::<Arc<StudentService>>()?;
        service
            .create(StudentInput { name, age, grade })
            .await
            .map(Student::from)
            .map_err(|e| to_graphql_error(&e))
    }
}

fn to_graphql_error(err: &StudentError) -> Error {
    match err {
        StudentError::NotFound(_) => Error::new(err.to_string())
            .extend_with(|_, ex| ex.set("code", "NOT_FOUND")),
        StudentError::Repository(_) => {
            let body = ErrorBody::new(500, "Internal Server Error", err.to_string());
            Error::new(err.to_string()).extend_with(|_, ex| {
                ex.set("code", "INTERNAL_ERROR");
                ex.set("status", body.status as i32);
                ex.set("timestamp", body.timestamp.as_str());
            })
        }
    }
}

pub fn build_schema(service: Arc<StudentService>) -> StudentSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// POST /graphql. Standard GraphQL-over-HTTP: a JSON request document in,
/// the data/errors envelope out (always HTTP 200).
pub async fn handle(
    State(state): State<ServerState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::student::repository::mock::MockStudentRepository;

    fn schema() -> StudentSchema {
        let service = Arc::new(StudentService::new(Arc::new(MockStudentRepository::default())));
        build_schema(service)
    }

    #[tokio::test]
    async fn create_student_mutation_returns_assigned_id() {
        let schema = schema();
        let resp = schema
            .execute(r#"mutation { createStudent(name: "John Doe", age: 15, grade: "A") { id name age grade } }"#)
            .await;
        assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);

        let data = resp.data.into_json().expect("json data");
        let student = &data["createStudent"];
        assert_eq!(student["name"], "John Doe");
        assert_eq!(student["age"], 15);
        assert_eq!(student["grade"], "A");
        assert!(student["id"].as_i64().expect("id is an integer") >= 1);
    }

    #[tokio::test]
    async fn student_by_id_roundtrips_created_record() {
        let schema = schema();
        let created = schema
            .execute(r#"mutation { createStudent(name: "Jane", age: 14, grade: "B") { id } }"#)
            .await;
        let id = created.data.into_json().expect("json")["createStudent"]["id"]
            .as_i64()
            .expect("id");

        let resp = schema
            .execute(format!("{{ studentById(id: {id}) {{ id name age grade }} }}"))
            .await;
        assert!(resp.errors.is_empty());
        let data = resp.data.into_json().expect("json data");
        assert_eq!(data["studentById"]["name"], "Jane");
        assert_eq!(data["studentById"]["id"], id);
    }

    #[tokio::test]
    async fn student_by_id_missing_reports_not_found_extension() {
        let schema = schema();
        let resp = schema.execute("{ studentById(id: 999999) { id } }").await;
        assert_eq!(resp.errors.len(), 1);

        let err = &resp.errors[0];
        assert!(err.message.contains("999999"), "message should carry the id: {}", err.message);
        let extensions = serde_json::to_value(err.extensions.as_ref().expect("extensions"))
            .expect("serializable extensions");
        assert_eq!(extensions["code"], "NOT_FOUND");
    }
}
