use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::batch_dto::{AssignStagesPayload, CreateBatchPayload, UpdateBatchPayload};
use crate::error::Result;
use crate::AppState;

pub async fn create_batch(
    State(state): State<AppState>,
    Json(payload): Json<CreateBatchPayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    let batch = state.batch_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

pub async fn list_batches(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let batches = state.batch_service.list().await?;
    Ok(Json(batches))
}

pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let batch = state.batch_service.get(&id).await?;
    Ok(Json(batch))
}

pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBatchPayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    let batch = state.batch_service.update(&id, payload).await?;
    Ok(Json(batch))
}

pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    state.batch_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the batch's selection process with the given stage sequence.
pub async fn assign_stages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AssignStagesPayload>,
) -> Result<impl axum::response::IntoResponse> {
    let assignments = state.batch_service.set_assignments(&id, payload).await?;
    Ok(Json(assignments))
}

pub async fn list_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let assignments = state.batch_service.assignments(&id).await?;
    Ok(Json(assignments))
}
