use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::{
    dto::candidate_dto::CandidateListQuery,
    error::{Error, Result},
    AppState,
};

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let result = state
        .candidate_service
        .list(query.page.unwrap_or(1), query.limit.unwrap_or(10))
        .await?;
    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let mut detail = state
        .candidate_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

    for application in detail.applications.iter_mut() {
        match state
            .media_service
            .get_object(&application.resume_file_path)
            .await
        {
            Ok(bytes) => application.resume_file_b64 = Some(BASE64.encode(bytes)),
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    application_id = application.id,
                    "failed to fetch resume"
                );
                application.resume_file_b64 = None;
            }
        }
    }

    Ok(Json(detail))
}
