use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::batch::BatchStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub job_title: String,
    pub status: Option<BatchStatus>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub max_candidates: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub current_candidates: i32,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub completion_rate: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub average_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchPayload {
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_candidates: Option<i32>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_candidates: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_time: Option<f64>,
}

/// Replaces a batch's stage assignment set; order follows list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStagesPayload {
    pub stage_ids: Vec<String>,
}
