use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const WORK_TYPES: [&str; 4] = ["remote", "hybrid", "onsite", "freelancer"];
pub const DEFAULT_WORK_TYPE: &str = "onsite";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub work_type: String,
    pub location: Option<String>,
    pub description: String,
    pub status: String,
    pub created_by_admin_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
