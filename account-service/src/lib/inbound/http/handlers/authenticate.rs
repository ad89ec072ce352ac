use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    // Both unknown email and wrong password surface as the same error
    let account = state
        .account_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let response = issue_access_token(&state, &account)?;
    Ok(ApiSuccess::new(StatusCode::OK, response))
}

/// Build the authenticated response for an account, issuing a JWT.
///
/// Shared with the magic-link login handler.
pub(super) fn issue_access_token(
    state: &AppState,
    account: &Account,
) -> Result<AuthenticateResponseData, ApiError> {
    let claims = security::Claims::for_account(
        account.id,
        account.email.as_str().to_string(),
        state.jwt_expiration_hours,
    );

    let token = state.authenticator.generate_token(&claims).map_err(|e| {
        ApiError::InternalServerError(format!("Token generation failed: {}", e))
    })?;

    Ok(AuthenticateResponseData {
        account: account.into(),
        token,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub account: AccountData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
    pub sign_in_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            email_verified: account.email_verified,
            sign_in_count: account.sign_in_count,
            created_at: account.created_at,
        }
    }
}
