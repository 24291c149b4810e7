use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::stage_dto::{CreateStagePayload, MoveStagePayload, UpdateStagePayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/integration/stages",
    request_body = CreateStagePayload,
    responses(
        (status = 201, description = "Stage created successfully"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_stage(
    State(state): State<AppState>,
    Json(payload): Json<CreateStagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let stage = state.stage_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(stage)))
}

#[utoipa::path(
    get,
    path = "/api/integration/stages",
    responses(
        (status = 200, description = "Pipeline templates in order")
    )
)]
#[axum::debug_handler]
pub async fn list_stages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stages = state.stage_service.list().await?;
    Ok(Json(stages))
}

#[utoipa::path(
    patch,
    path = "/api/integration/stages/{id}",
    params(
        ("id" = String, Path, description = "Stage ID")
    ),
    request_body = UpdateStagePayload,
    responses(
        (status = 200, description = "Stage updated successfully"),
        (status = 404, description = "Stage not found")
    )
)]
#[axum::debug_handler]
pub async fn update_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let stage = state.stage_service.update(&id, payload).await?;
    Ok(Json(stage))
}

#[utoipa::path(
    delete,
    path = "/api/integration/stages/{id}",
    params(
        ("id" = String, Path, description = "Stage ID")
    ),
    responses(
        (status = 204, description = "Stage deleted successfully")
    )
)]
#[axum::debug_handler]
pub async fn delete_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.stage_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Swaps a stage with its neighbour and returns the rewritten pipeline.
#[axum::debug_handler]
pub async fn move_stage(
    State(state): State<AppState>,
    Json(payload): Json<MoveStagePayload>,
) -> Result<impl IntoResponse> {
    let stages = state.stage_service.move_stage(payload).await?;
    Ok(Json(stages))
}
