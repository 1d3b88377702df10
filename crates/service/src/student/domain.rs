use serde::{Deserialize, Serialize};

/// Create input: what a client supplies for a new student. The id is
/// absent on purpose; the database assigns it on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

/// Output view of a persisted student, id included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub grade: String,
}
