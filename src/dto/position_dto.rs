use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::position::Position;
use crate::services::position_service::PositionList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    pub work_type: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub category: Option<String>,
    pub work_type: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub work_type: String,
    pub location: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List rows omit the description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub work_type: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionListResponse {
    pub data: Vec<PositionSummary>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PositionListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

impl From<Position> for PositionResponse {
    fn from(value: Position) -> Self {
        Self {
            id: value.id,
            title: value.title,
            category: value.category,
            work_type: value.work_type,
            location: value.location,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Position> for PositionSummary {
    fn from(value: Position) -> Self {
        Self {
            id: value.id,
            title: value.title,
            category: value.category,
            work_type: value.work_type,
            location: value.location,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<PositionList> for PositionListResponse {
    fn from(value: PositionList) -> Self {
        Self {
            data: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            limit: value.limit,
            total_pages: value.total_pages,
        }
    }
}
