use crate::dto::stage_dto::{CreateStagePayload, MoveDirection, MoveStagePayload, UpdateStagePayload};
use crate::error::{Error, Result};
use crate::models::stage::StageTemplate;
use crate::store::{Collection, Order};
use chrono::Utc;
use serde_json::json;

/// Registry of the organization-wide pipeline: the ordered stage templates
/// that new candidates are enrolled into.
#[derive(Clone)]
pub struct StageService {
    stages: Collection<StageTemplate>,
}

impl StageService {
    pub fn new(stages: Collection<StageTemplate>) -> Self {
        Self { stages }
    }

    /// Appends a stage at the end of the pipeline.
    pub async fn create(&self, payload: CreateStagePayload) -> Result<StageTemplate> {
        let existing = self.list().await?;
        let mut stage = StageTemplate {
            id: String::new(),
            name: payload.name,
            description: payload.description,
            order: existing.len() as i32 + 1,
            duration: payload.duration,
            created_at: Utc::now(),
        };
        stage.id = self.stages.add(&stage).await?;
        Ok(stage)
    }

    pub async fn list(&self) -> Result<Vec<StageTemplate>> {
        self.stages.list(Order::asc("order")).await
    }

    pub async fn get(&self, id: &str) -> Result<StageTemplate> {
        self.stages
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Stage {} not found", id)))
    }

    pub async fn update(&self, id: &str, payload: UpdateStagePayload) -> Result<StageTemplate> {
        let patch = serde_json::to_value(&payload)?;
        self.stages.update(id, patch).await?;
        self.get(id).await
    }

    /// Removes a template. Surviving stages keep their order numbers and
    /// already-enrolled candidates keep their progress records.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.stages.delete(id).await
    }

    /// Swaps the stage with its neighbour, then rewrites the order field of
    /// every template. A move at the edge of the pipeline is a no-op.
    pub async fn move_stage(&self, payload: MoveStagePayload) -> Result<Vec<StageTemplate>> {
        let mut stages = self.list().await?;
        let index = stages
            .iter()
            .position(|s| s.id == payload.stage_id)
            .ok_or_else(|| Error::NotFound(format!("Stage {} not found", payload.stage_id)))?;

        let neighbour = match payload.direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => {
                if index + 1 < stages.len() {
                    Some(index + 1)
                } else {
                    None
                }
            }
        };
        let Some(neighbour) = neighbour else {
            return Ok(stages);
        };

        stages.swap(index, neighbour);
        for (position, stage) in stages.iter_mut().enumerate() {
            stage.order = position as i32 + 1;
            self.stages
                .update(&stage.id, json!({ "order": stage.order }))
                .await?;
        }
        Ok(stages)
    }
}
