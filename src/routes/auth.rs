use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (token, account) = state
        .admin_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(LoginResponse {
        token,
        account: account.into(),
    }))
}
