use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub total_candidates: i64,
    pub pending: i64,
    pub reviewing: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    pub region: String,
    pub candidates: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStat {
    pub stage_id: String,
    pub stage: String,
    /// Candidates currently sitting in this stage.
    pub candidates: i64,
    /// Share of this stage's progress records that are completed.
    pub completion: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: StatusTotals,
    pub region_data: Vec<RegionStat>,
    pub process_stages: Vec<StageStat>,
    pub total_jobs: i64,
    pub active_jobs: i64,
}
