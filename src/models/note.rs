use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only free-text note on a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateNote {
    pub id: String,
    pub candidate_id: String,
    pub note: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
