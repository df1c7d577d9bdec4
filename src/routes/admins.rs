use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    dto::admin_dto::{
        AdminListQuery, AdminListResponse, AdminResponse, AdminStatusResponse, CreateAdminPayload,
        UpdateAdminPayload,
    },
    error::Result,
    middleware::auth::require_superadmin,
    utils::jwt::Claims,
    AppState,
};

/// Claims are absent only while the admin table is empty; the service
/// re-checks the count transactionally and decides whether this is a
/// bootstrap creation or a superadmin-gated one.
#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state
        .admin_service
        .create_admin(payload, claims.as_ref().map(|ext| &ext.0))
        .await?;
    Ok((StatusCode::CREATED, Json(AdminResponse::from(admin))))
}

#[axum::debug_handler]
pub async fn list_admins(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.admin_service.list(query).await?;
    Ok(Json(AdminListResponse::from(result)))
}

#[axum::debug_handler]
pub async fn update_admin(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdminPayload>,
) -> Result<impl IntoResponse> {
    require_superadmin(claims.as_ref().map(|ext| &ext.0))?;
    payload.validate()?;
    let admin = state.admin_service.update_admin(id, payload).await?;
    Ok(Json(AdminResponse::from(admin)))
}

#[axum::debug_handler]
pub async fn toggle_admin_status(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    require_superadmin(claims.as_ref().map(|ext| &ext.0))?;
    let admin = state.admin_service.toggle_status(id).await?;
    Ok(Json(AdminStatusResponse {
        id: admin.id,
        status: admin.status,
    }))
}
