use crate::dto::candidate_dto::CreateNotePayload;
use crate::error::Result;
use crate::models::note::CandidateNote;
use crate::store::{Collection, Order};
use chrono::Utc;
use serde_json::json;

/// Append-only notes on candidates. Notes are never edited or removed
/// individually; they only go away when their candidate does.
#[derive(Clone)]
pub struct NoteService {
    notes: Collection<CandidateNote>,
}

impl NoteService {
    pub fn new(notes: Collection<CandidateNote>) -> Self {
        Self { notes }
    }

    pub async fn add(&self, candidate_id: &str, payload: CreateNotePayload) -> Result<CandidateNote> {
        let mut note = CandidateNote {
            id: String::new(),
            candidate_id: candidate_id.to_string(),
            note: payload.note,
            created_by: payload.created_by,
            created_at: Utc::now(),
        };
        note.id = self.notes.add(&note).await?;
        Ok(note)
    }

    pub async fn list(&self, candidate_id: &str) -> Result<Vec<CandidateNote>> {
        self.notes
            .find_by("candidateId", json!(candidate_id), Order::desc("createdAt"))
            .await
    }
}
