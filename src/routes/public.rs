use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use validator::Validate;

use crate::dto::candidate_dto::{ApplicationResponse, CreateCandidatePayload};
use crate::error::Result;
use crate::AppState;

/// Public application form submission: profile fields plus an optional
/// résumé file. Validation happens before anything is written; the résumé is
/// stored after the candidate exists so the blob lands under its id.
pub async fn submit_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl axum::response::IntoResponse> {
    tracing::info!("Application submission received");
    let mut name = String::new();
    let mut email = String::new();
    let mut phone = String::new();
    let mut city = String::new();
    let mut state_name = String::new();
    let mut position = String::new();
    let mut experience = String::new();
    let mut motivation = String::new();
    let mut resume: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => name = field.text().await.unwrap_or_default(),
            "email" => email = field.text().await.unwrap_or_default(),
            "phone" => phone = field.text().await.unwrap_or_default(),
            "city" => city = field.text().await.unwrap_or_default(),
            "state" => state_name = field.text().await.unwrap_or_default(),
            "position" => position = field.text().await.unwrap_or_default(),
            "experience" => experience = field.text().await.unwrap_or_default(),
            "motivation" => motivation = field.text().await.unwrap_or_default(),
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read resume bytes: {}", e);
                    crate::error::Error::BadRequest("Failed to read file upload".into())
                })?;
                if !data.is_empty() {
                    resume = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    let location = match (city.trim(), state_name.trim()) {
        ("", "") => String::new(),
        (city, "") => city.to_string(),
        ("", state_name) => state_name.to_string(),
        (city, state_name) => format!("{}, {}", city, state_name),
    };

    let payload = CreateCandidatePayload {
        name,
        email,
        phone,
        location,
        position,
        experience,
        motivation,
        resume_url: None,
    };
    payload.validate()?;

    let candidate = state.candidate_service.create(payload).await?;

    if let Some((filename, data)) = resume {
        let url = state
            .file_store
            .store_resume(&candidate.id, &filename, &data)
            .await?;
        state
            .candidate_service
            .set_resume_url(&candidate.id, &url)
            .await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            id: candidate.id,
            status: "received".into(),
        }),
    ))
}
