use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback current-stage label used when a candidate is created while the
/// stage registry is empty.
pub const DEFAULT_STAGE_NAME: &str = "Screening";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free text, conventionally "city, state".
    pub location: String,
    pub position: String,
    pub experience: String,
    pub motivation: String,
    pub resume_url: Option<String>,
    pub status: CandidateStatus,
    /// Name of the stage the candidate currently sits in. Written at
    /// creation and by the stage tracker's advance operation only.
    pub current_stage: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
