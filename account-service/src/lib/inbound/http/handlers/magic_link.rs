use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::EmailDispatchData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::authenticate::issue_access_token;
use crate::inbound::http::handlers::authenticate::AuthenticateResponseData;
use crate::inbound::http::router::AppState;

pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(body): Json<MagicLinkRequestBody>,
) -> Result<ApiSuccess<EmailDispatchData>, ApiError> {
    state
        .account_service
        .send_magic_link(&body.email, body.check_before_send)
        .await
        .map_err(ApiError::from)
        .map(|dispatch| ApiSuccess::new(StatusCode::OK, dispatch.into()))
}

pub async fn login_with_magic_link(
    State(state): State<AppState>,
    Json(body): Json<MagicLinkLoginBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let account = state
        .account_service
        .authenticate_with_magic_link(&body.token)
        .await
        .map_err(ApiError::from)?;

    let response = issue_access_token(&state, &account)?;
    Ok(ApiSuccess::new(StatusCode::OK, response))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MagicLinkRequestBody {
    email: String,
    #[serde(default)]
    check_before_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MagicLinkLoginBody {
    token: String,
}
