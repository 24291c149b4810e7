use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::note::CandidateNote;
use crate::services::tracking_service::TrackingService;
use crate::store::{Collection, CollectionWatcher, Order};
use crate::utils::json::insert_field;
use chrono::Utc;
use serde_json::json;

#[derive(Clone)]
pub struct CandidateService {
    candidates: Collection<Candidate>,
    notes: Collection<CandidateNote>,
    tracking: TrackingService,
}

impl CandidateService {
    pub fn new(
        candidates: Collection<Candidate>,
        notes: Collection<CandidateNote>,
        tracking: TrackingService,
    ) -> Self {
        Self {
            candidates,
            notes,
            tracking,
        }
    }

    /// Persists the profile and enrolls it into the current pipeline.
    ///
    /// Enrollment failure does not roll the candidate back: the record stays
    /// behind without progress records and the failure is logged once.
    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let current_stage = self.tracking.initial_stage_name().await?;
        let now = Utc::now();
        let mut candidate = Candidate {
            id: String::new(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            location: payload.location,
            position: payload.position,
            experience: payload.experience,
            motivation: payload.motivation,
            resume_url: payload.resume_url,
            status: CandidateStatus::Pending,
            current_stage,
            created_at: now,
            updated_at: now,
        };
        candidate.id = self.candidates.add(&candidate).await?;

        if let Err(e) = self.tracking.enroll(&candidate.id).await {
            tracing::warn!(
                candidate_id = %candidate.id,
                error = %e,
                "stage enrollment failed; candidate left without progress records"
            );
        }

        Ok(candidate)
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        self.candidates.list(Order::desc("createdAt")).await
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.candidates
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))
    }

    pub async fn update(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let mut patch = serde_json::to_value(&payload)?;
        insert_field(&mut patch, "updatedAt", json!(Utc::now()))?;
        self.candidates.update(id, patch).await?;
        self.get(id).await
    }

    /// Sets the résumé URL once the upload has landed in the file store.
    pub async fn set_resume_url(&self, id: &str, resume_url: &str) -> Result<()> {
        self.candidates
            .update(
                id,
                json!({ "resumeUrl": resume_url, "updatedAt": Utc::now() }),
            )
            .await
    }

    /// Removes the candidate together with its stage progress and notes.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.candidates.delete(id).await?;
        let removed = self.tracking.remove_enrollment(id).await?;
        let notes = self
            .notes
            .find_by("candidateId", json!(id), Order::desc("createdAt"))
            .await?;
        for note in &notes {
            self.notes.delete(&note.id).await?;
        }
        tracing::info!(
            candidate_id = %id,
            stage_records = removed,
            notes = notes.len(),
            "candidate deleted with dependents"
        );
        Ok(())
    }

    /// Live subscription pushing the full candidate set on every change.
    pub fn watch(&self) -> CollectionWatcher<Candidate> {
        self.candidates.watch(Order::desc("createdAt"))
    }
}
