use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::EmailDispatchData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::authenticate::AccountData;
use crate::inbound::http::router::AppState;

/// Requesting a reset for an unknown email still answers 200 with
/// `email_sent: false`; existence of accounts is never revealed here.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetRequestBody>,
) -> Result<ApiSuccess<EmailDispatchData>, ApiError> {
    state
        .account_service
        .send_password_reset_email(&body.email, body.check_before_send)
        .await
        .map_err(ApiError::from)
        .map(|dispatch| ApiSuccess::new(StatusCode::OK, dispatch.into()))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .reset_password(&body.token, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordResetRequestBody {
    email: String,
    #[serde(default)]
    check_before_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    token: String,
    password: String,
}
