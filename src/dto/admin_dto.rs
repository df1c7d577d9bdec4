use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::admin::Admin;
use crate::services::admin_service::AdminList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminPayload {
    #[validate(length(min = 1, max = 60))]
    pub first_name: String,
    #[validate(length(min = 1, max = 60))]
    pub last_name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 8, max = 255))]
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminPayload {
    #[validate(length(min = 1, max = 60))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 100))]
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub created_by_admin_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    pub id: i32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListResponse {
    pub data: Vec<AdminResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

impl From<Admin> for AdminResponse {
    fn from(value: Admin) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            role: value.role,
            status: value.status,
            created_by_admin_id: value.created_by_admin_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<AdminList> for AdminListResponse {
    fn from(value: AdminList) -> Self {
        Self {
            data: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            limit: value.limit,
            total_pages: value.total_pages,
        }
    }
}
