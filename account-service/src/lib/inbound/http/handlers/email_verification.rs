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

pub async fn request_verification_email(
    State(state): State<AppState>,
    Json(body): Json<VerificationEmailRequestBody>,
) -> Result<ApiSuccess<EmailDispatchData>, ApiError> {
    state
        .account_service
        .send_verification_email(&body.email, body.check_before_send)
        .await
        .map_err(ApiError::from)
        .map(|dispatch| ApiSuccess::new(StatusCode::OK, dispatch.into()))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .verify_email(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationEmailRequestBody {
    email: String,
    #[serde(default)]
    check_before_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyEmailRequestBody {
    token: String,
}
