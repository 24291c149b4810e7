use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, AppState};

pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.stats_service.dashboard().await?;
    Ok(Json(stats))
}
