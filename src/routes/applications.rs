use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::{
    dto::application_dto::ApplicationListQuery,
    error::{Error, Result},
    AppState,
};

#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let result = state
        .application_service
        .list(query.page.unwrap_or(1), query.limit.unwrap_or(10))
        .await?;
    Ok(Json(result))
}

/// A store read failure degrades to a null resume field instead of
/// failing the whole request.
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let mut detail = state
        .application_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    match state.media_service.get_object(&detail.resume_file_path).await {
        Ok(bytes) => detail.resume_file_b64 = Some(BASE64.encode(bytes)),
        Err(e) => {
            tracing::error!(error = ?e, application_id = id, "failed to fetch resume");
            detail.resume_file_b64 = None;
        }
    }

    Ok(Json(detail))
}
