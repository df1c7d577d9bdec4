use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::{Error, ErrorCode, Result};
use crate::utils::jwt::{decode_token, Claims};
use crate::AppState;

/// Bearer-token gate for admin endpoints. While the admin table is empty
/// the request passes through unauthenticated (bootstrap window); after
/// that a valid token is required and the verified claims are attached to
/// the request extensions for downstream role checks.
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match state.admin_service.count_admins().await {
        Ok(0) => return next.run(req).await,
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = ?e, "admin count lookup failed in auth gate");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error", "code": ErrorCode::InternalServerError})),
            )
                .into_response();
        }
    }

    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing authorization header", "code": ErrorCode::InvalidJwt})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid token", "code": ErrorCode::Unauthorized})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid token", "code": ErrorCode::Unauthorized})),
        )
            .into_response();
    };

    let config = crate::config::get_config();
    match decode_token(token, &config.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid or expired token", "code": ErrorCode::InvalidJwt})),
        )
            .into_response(),
    }
}

/// Claims are absent only inside the bootstrap window.
pub fn require_identity(claims: Option<&Claims>) -> Result<&Claims> {
    claims.ok_or_else(|| Error::Unauthorized("Missing authorization header".to_string()))
}

pub fn require_superadmin(claims: Option<&Claims>) -> Result<&Claims> {
    let claims = require_identity(claims)?;
    if !claims.is_superadmin() {
        return Err(Error::Forbidden("Superadmin role required".to_string()));
    }
    Ok(claims)
}
