use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::CandidateStatus;
use crate::models::candidate_stage::CandidateStage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordFeedbackPayload {
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResponse {
    pub candidate_id: String,
    pub completed_stage: CandidateStage,
    /// `None` once the final stage has been completed.
    pub activated_stage: Option<CandidateStage>,
    pub pipeline_complete: bool,
    pub candidate_status: CandidateStatus,
}
