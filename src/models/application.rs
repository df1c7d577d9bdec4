use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Immutable after creation; the resume bytes live in the object store
/// under `resume_file_path`, never in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i32,
    pub candidate_id: i32,
    pub position_id: i32,
    pub resume_file_name: String,
    pub resume_file_path: String,
    pub created_at: DateTime<Utc>,
}
