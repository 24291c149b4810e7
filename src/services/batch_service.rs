use crate::dto::batch_dto::{AssignStagesPayload, CreateBatchPayload, UpdateBatchPayload};
use crate::error::{Error, Result};
use crate::models::batch::{Batch, BatchStatus, StageAssignment};
use crate::models::stage::StageTemplate;
use crate::store::{Collection, Order};
use chrono::Utc;
use serde_json::json;

/// Cohorts of candidates grouped under one job opening. Capacity figures are
/// plain HR-maintained counters with no link back to candidate records.
#[derive(Clone)]
pub struct BatchService {
    batches: Collection<Batch>,
    assignments: Collection<StageAssignment>,
    stages: Collection<StageTemplate>,
}

impl BatchService {
    pub fn new(
        batches: Collection<Batch>,
        assignments: Collection<StageAssignment>,
        stages: Collection<StageTemplate>,
    ) -> Self {
        Self {
            batches,
            assignments,
            stages,
        }
    }

    pub async fn create(&self, payload: CreateBatchPayload) -> Result<Batch> {
        let mut batch = Batch {
            id: String::new(),
            name: payload.name,
            job_title: payload.job_title,
            status: payload.status.unwrap_or(BatchStatus::Planned),
            start_date: payload.start_date,
            end_date: payload.end_date,
            max_candidates: payload.max_candidates,
            current_candidates: payload.current_candidates,
            completion_rate: payload.completion_rate,
            average_time: payload.average_time,
            created_at: Utc::now(),
        };
        batch.id = self.batches.add(&batch).await?;
        Ok(batch)
    }

    pub async fn list(&self) -> Result<Vec<Batch>> {
        self.batches.list(Order::desc("createdAt")).await
    }

    pub async fn get(&self, id: &str) -> Result<Batch> {
        self.batches
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Batch {} not found", id)))
    }

    pub async fn update(&self, id: &str, payload: UpdateBatchPayload) -> Result<Batch> {
        let patch = serde_json::to_value(&payload)?;
        self.batches.update(id, patch).await?;
        self.get(id).await
    }

    /// Removes the batch and its stage assignment links.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.batches.delete(id).await?;
        for assignment in self.assignments(id).await? {
            self.assignments.delete(&assignment.id).await?;
        }
        Ok(())
    }

    /// Replaces the batch's assignment set with the given stages, ordered by
    /// list position. Unknown stage ids abort before anything is written.
    pub async fn set_assignments(
        &self,
        batch_id: &str,
        payload: AssignStagesPayload,
    ) -> Result<Vec<StageAssignment>> {
        self.get(batch_id).await?;

        let templates = self.stages.list(Order::asc("order")).await?;
        let mut resolved = Vec::with_capacity(payload.stage_ids.len());
        for stage_id in &payload.stage_ids {
            let template = templates
                .iter()
                .find(|t| t.id == *stage_id)
                .ok_or_else(|| Error::BadRequest(format!("Unknown stage {}", stage_id)))?;
            resolved.push(template.clone());
        }

        for existing in self.assignments(batch_id).await? {
            self.assignments.delete(&existing.id).await?;
        }

        let mut created = Vec::with_capacity(resolved.len());
        for (index, template) in resolved.into_iter().enumerate() {
            let mut assignment = StageAssignment {
                id: String::new(),
                batch_id: batch_id.to_string(),
                stage_id: template.id,
                stage_name: template.name,
                order: index as i32 + 1,
                created_at: Utc::now(),
            };
            assignment.id = self.assignments.add(&assignment).await?;
            created.push(assignment);
        }
        Ok(created)
    }

    pub async fn assignments(&self, batch_id: &str) -> Result<Vec<StageAssignment>> {
        self.assignments
            .find_by("batchId", json!(batch_id), Order::asc("order"))
            .await
    }
}
