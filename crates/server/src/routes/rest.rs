use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::student::domain::{StudentInput, StudentRecord};

use crate::errors::ApiError;
use crate::state::ServerState;

/// POST /api/students: create a student, reply 201 with the stored record.
pub async fn create_student(
    State(state): State<ServerState>,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<StudentRecord>), ApiError> {
    let record = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/students/:id: fetch one student or 404.
pub async fn get_student(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentRecord>, ApiError> {
    let record = state.service.get_by_id(id).await?;
    Ok(Json(record))
}
