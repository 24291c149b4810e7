use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageProgressStatus {
    Pending,
    Current,
    Completed,
}

/// One candidate's progress against one stage template, instantiated at
/// enrollment time. Records move `pending -> current -> completed` and never
/// back; at most one record per candidate is `current`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStage {
    pub id: String,
    pub candidate_id: String,
    pub stage_id: String,
    pub stage_name: String,
    /// Position in the pipeline at enrollment time; registry edits after
    /// the fact do not touch it.
    pub stage_order: i32,
    pub status: StageProgressStatus,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
