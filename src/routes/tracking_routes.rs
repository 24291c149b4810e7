use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::dto::tracking_dto::RecordFeedbackPayload;
use crate::error::Result;
use crate::AppState;

pub async fn get_candidate_stages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let stages = state.tracking_service.stages_for(&id).await?;
    Ok(Json(stages))
}

/// Completes the candidate's active stage and activates the next one; on the
/// final stage it reports pipeline completion instead.
pub async fn advance_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let advancement = state.tracking_service.advance(&id).await?;
    Ok(Json(advancement))
}

pub async fn record_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RecordFeedbackPayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    let record = state.tracking_service.record_feedback(&id, payload).await?;
    Ok(Json(record))
}
