use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use validator::Validate;

use crate::dto::candidate_dto::{CreateCandidatePayload, CreateNotePayload, UpdateCandidatePayload};
use crate::error::Result;
use crate::AppState;

pub async fn list_candidates(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let candidates = state.candidate_service.list().await?;
    Ok(Json(candidates))
}

pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let candidate = state.candidate_service.get(&id).await?;
    Ok(Json(candidate))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.update(&id, payload).await?;
    Ok(Json(candidate))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    state.candidate_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse> {
    let notes = state.note_service.list(&id).await?;
    Ok(Json(notes))
}

pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl axum::response::IntoResponse> {
    payload.validate()?;
    state.candidate_service.get(&id).await?;
    let note = state.note_service.add(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Pushes the full candidate set as a server-sent event on every store
/// change. The subscription is torn down when the client goes away and the
/// stream is dropped.
pub async fn watch_candidates(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let watcher = state.candidate_service.watch();
    let stream = futures::stream::unfold(watcher, |mut watcher| async move {
        match watcher.recv().await {
            Ok(snapshot) => match Event::default().json_data(&snapshot) {
                Ok(event) => Some((Ok::<_, Infallible>(event), watcher)),
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode candidate snapshot");
                    None
                }
            },
            Err(_) => None,
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
