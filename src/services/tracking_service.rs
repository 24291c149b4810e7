use crate::dto::tracking_dto::{AdvanceResponse, RecordFeedbackPayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus, DEFAULT_STAGE_NAME};
use crate::models::candidate_stage::{CandidateStage, StageProgressStatus};
use crate::models::stage::StageTemplate;
use crate::store::{Collection, Order};
use crate::utils::json::insert_field;
use chrono::Utc;
use serde_json::json;

/// Tracks each candidate's walk through the pipeline: enrollment at
/// creation time, the advance operation, and per-stage feedback.
#[derive(Clone)]
pub struct TrackingService {
    stages: Collection<StageTemplate>,
    progress: Collection<CandidateStage>,
    candidates: Collection<Candidate>,
}

impl TrackingService {
    pub fn new(
        stages: Collection<StageTemplate>,
        progress: Collection<CandidateStage>,
        candidates: Collection<Candidate>,
    ) -> Self {
        Self {
            stages,
            progress,
            candidates,
        }
    }

    /// Name a freshly created candidate starts in: the lowest-order template,
    /// or the default label when the registry is empty.
    pub async fn initial_stage_name(&self) -> Result<String> {
        let templates = self.stages.list(Order::asc("order")).await?;
        Ok(templates
            .first()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| DEFAULT_STAGE_NAME.to_string()))
    }

    /// Instantiates one progress record per registry template, in registry
    /// order: the first becomes `current`, the rest `pending`.
    ///
    /// The writes are independent; a failure partway leaves the candidate
    /// with a partial stage set. The caller decides what to do about that.
    pub async fn enroll(&self, candidate_id: &str) -> Result<Vec<CandidateStage>> {
        let templates = self.stages.list(Order::asc("order")).await?;
        let mut created = Vec::with_capacity(templates.len());
        for (index, template) in templates.iter().enumerate() {
            let now = Utc::now();
            let status = if index == 0 {
                StageProgressStatus::Current
            } else {
                StageProgressStatus::Pending
            };
            let mut record = CandidateStage {
                id: String::new(),
                candidate_id: candidate_id.to_string(),
                stage_id: template.id.clone(),
                stage_name: template.name.clone(),
                stage_order: index as i32 + 1,
                status,
                score: None,
                feedback: None,
                completed_at: None,
                created_at: now,
                updated_at: now,
            };
            record.id = self.progress.add(&record).await?;
            created.push(record);
        }
        Ok(created)
    }

    /// Progress records of one candidate, in pipeline order.
    pub async fn stages_for(&self, candidate_id: &str) -> Result<Vec<CandidateStage>> {
        self.progress
            .find_by("candidateId", json!(candidate_id), Order::asc("stageOrder"))
            .await
    }

    /// Completes the candidate's active stage and activates the next one.
    ///
    /// With no active stage this reports `NoActiveStage`; with more than one
    /// it reports `StageConflict`. Neither mutates anything. Completing the
    /// final stage closes the pipeline: no new stage is activated and the
    /// candidate's status flips to `approved`.
    pub async fn advance(&self, candidate_id: &str) -> Result<AdvanceResponse> {
        let candidate = self
            .candidates
            .get(candidate_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", candidate_id)))?;

        let records = self.stages_for(candidate_id).await?;
        let mut actives = records
            .iter()
            .filter(|r| r.status == StageProgressStatus::Current);
        let current = match (actives.next(), actives.next()) {
            (None, _) => return Err(Error::NoActiveStage(candidate_id.to_string())),
            (Some(_), Some(_)) => {
                return Err(Error::StageConflict(format!(
                    "candidate {} has more than one active stage",
                    candidate_id
                )))
            }
            (Some(record), None) => record.clone(),
        };

        let next = records
            .iter()
            .find(|r| r.stage_order > current.stage_order)
            .cloned();

        let now = Utc::now();
        self.progress
            .update(
                &current.id,
                json!({ "status": "completed", "completedAt": now, "updatedAt": now }),
            )
            .await?;
        let mut completed = current;
        completed.status = StageProgressStatus::Completed;
        completed.completed_at = Some(now);
        completed.updated_at = now;

        match next {
            Some(next) => {
                self.progress
                    .update(&next.id, json!({ "status": "current", "updatedAt": now }))
                    .await?;
                self.candidates
                    .update(
                        candidate_id,
                        json!({ "currentStage": next.stage_name, "updatedAt": now }),
                    )
                    .await?;
                let mut activated = next;
                activated.status = StageProgressStatus::Current;
                activated.updated_at = now;
                Ok(AdvanceResponse {
                    candidate_id: candidate_id.to_string(),
                    completed_stage: completed,
                    activated_stage: Some(activated),
                    pipeline_complete: false,
                    candidate_status: candidate.status,
                })
            }
            None => {
                self.candidates
                    .update(
                        candidate_id,
                        json!({ "status": "approved", "updatedAt": now }),
                    )
                    .await?;
                Ok(AdvanceResponse {
                    candidate_id: candidate_id.to_string(),
                    completed_stage: completed,
                    activated_stage: None,
                    pipeline_complete: true,
                    candidate_status: CandidateStatus::Approved,
                })
            }
        }
    }

    /// Stores score and feedback on one progress record. No status
    /// transition is implied.
    pub async fn record_feedback(
        &self,
        progress_id: &str,
        payload: RecordFeedbackPayload,
    ) -> Result<CandidateStage> {
        let mut patch = serde_json::to_value(&payload)?;
        insert_field(&mut patch, "updatedAt", json!(Utc::now()))?;
        self.progress.update(progress_id, patch).await?;
        self.progress
            .get(progress_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Stage progress {} not found", progress_id)))
    }

    /// Deletes every progress record of a candidate; returns how many went.
    pub async fn remove_enrollment(&self, candidate_id: &str) -> Result<usize> {
        let records = self.stages_for(candidate_id).await?;
        for record in &records {
            self.progress.delete(&record.id).await?;
        }
        Ok(records.len())
    }
}
