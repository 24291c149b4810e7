use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

/// A named grouping of candidates tied to one job opening and time window.
/// Membership is bookkeeping only: the counters are maintained by HR and
/// carry no referential link to candidate records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub name: String,
    /// Denormalized job title, not a foreign key; the referenced posting may
    /// be deleted out from under it.
    pub job_title: String,
    pub status: BatchStatus,
    pub start_date: String,
    pub end_date: String,
    pub max_candidates: i32,
    pub current_candidates: i32,
    pub completion_rate: f64,
    /// Average days spent in process, manually maintained.
    pub average_time: f64,
    pub created_at: DateTime<Utc>,
}

/// Ordered link between a batch and a stage template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAssignment {
    pub id: String,
    pub batch_id: String,
    pub stage_id: String,
    pub stage_name: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}
