use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::application_dto::ApplicationPositionDetail;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListItem {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub aliases: Option<String>,
    pub application_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListResponse {
    pub data: Vec<CandidateListItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplicationItem {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub resume_file_name: String,
    pub resume_file_path: String,
    pub position: Option<ApplicationPositionDetail>,
    pub resume_file_b64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetailResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub aliases: Option<String>,
    pub applications: Vec<CandidateApplicationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CandidateListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
