use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    #[validate(length(min = 1, max = 180))]
    pub full_name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    pub file_b64: String,
    #[validate(length(min = 1))]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: i32,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBrief {
    pub id: i32,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub resume_file_name: String,
    pub candidate: Option<CandidateSummary>,
    pub position: Option<PositionBrief>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub data: Vec<ApplicationListItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCandidateDetail {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub aliases: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPositionDetail {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub work_type: String,
    pub location: Option<String>,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailResponse {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub resume_file_name: String,
    pub resume_file_path: String,
    pub candidate: Option<ApplicationCandidateDetail>,
    pub position: Option<ApplicationPositionDetail>,
    /// Null when the object store read fails; the request still succeeds.
    pub resume_file_b64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
