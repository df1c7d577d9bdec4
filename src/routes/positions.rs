use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use validator::Validate;

use crate::{
    dto::{
        application_dto::CreateApplicationPayload,
        position_dto::{
            CreatePositionPayload, PositionListQuery, PositionListResponse, PositionResponse,
            UpdatePositionPayload,
        },
    },
    error::{Error, Result},
    middleware::auth::require_identity,
    services::media_service::MediaService,
    utils::jwt::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn create_position(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<CreatePositionPayload>,
) -> Result<impl IntoResponse> {
    let claims = require_identity(claims.as_ref().map(|ext| &ext.0))?;
    payload.validate()?;
    let position = state
        .position_service
        .create(payload, claims.admin_id()?)
        .await?;
    Ok((StatusCode::CREATED, Json(PositionResponse::from(position))))
}

#[axum::debug_handler]
pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<PositionListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.position_service.list(query).await?;
    Ok(Json(PositionListResponse::from(result)))
}

#[axum::debug_handler]
pub async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let position = state
        .position_service
        .get_active(id)
        .await?
        .ok_or_else(|| Error::NotFound("Position not found".to_string()))?;
    Ok(Json(PositionResponse::from(position)))
}

#[axum::debug_handler]
pub async fn update_position(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePositionPayload>,
) -> Result<impl IntoResponse> {
    require_identity(claims.as_ref().map(|ext| &ext.0))?;
    payload.validate()?;
    let position = state.position_service.update(id, payload).await?;
    Ok(Json(PositionResponse::from(position)))
}

#[axum::debug_handler]
pub async fn delete_position(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    require_identity(claims.as_ref().map(|ext| &ext.0))?;
    state.position_service.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public application intake. The upload lands in the store before the
/// database transaction; on insert failure the object is removed again so
/// a failed application does not leak an orphan upload.
#[axum::debug_handler]
pub async fn apply_to_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    state
        .position_service
        .get_active(id)
        .await?
        .ok_or_else(|| Error::NotFound("Position not found".to_string()))?;

    payload.validate()?;

    let decoded = BASE64
        .decode(payload.file_b64.as_bytes())
        .map_err(|_| Error::BadRequest("Invalid base64 file payload".to_string()))?;

    if decoded.len() > state.media_service.max_file_size() {
        return Err(Error::BadRequest(format!(
            "File is larger than {}",
            state.media_service.max_file_size()
        )));
    }

    if !MediaService::is_pdf(&decoded) {
        return Err(Error::BadRequest(
            "Invalid file type. Only PDF is allowed.".to_string(),
        ));
    }

    let file_path = MediaService::build_object_key(&payload.file_name);
    state
        .media_service
        .put_object(&file_path, &decoded.into())
        .await?;

    match state
        .application_service
        .create(
            id,
            &payload.full_name,
            &payload.email,
            &payload.file_name,
            &file_path,
        )
        .await
    {
        Ok(application) => Ok((StatusCode::CREATED, Json(application))),
        Err(e) => {
            if let Err(cleanup) = state.media_service.delete_object(&file_path).await {
                tracing::error!(error = ?cleanup, file_path = %file_path, "failed to remove orphaned resume");
            }
            Err(e)
        }
    }
}
