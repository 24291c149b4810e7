use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization-wide definition of one step in the hiring pipeline. The
/// ordered set of these templates is the sequence new candidates are
/// enrolled into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 1-based position in the pipeline.
    pub order: i32,
    /// Expected duration in days.
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}
