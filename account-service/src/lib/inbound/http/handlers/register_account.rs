use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterAccountCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register_account(
    State(state): State<AppState>,
    Json(body): Json<RegisterAccountRequest>,
) -> Result<ApiSuccess<RegisterAccountResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterAccountRequest {
    email_address: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterAccountRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterAccountRequest {
    fn try_into_command(self) -> Result<RegisterAccountCommand, ParseRegisterAccountRequestError> {
        let email = EmailAddress::new(self.email_address)?;
        Ok(RegisterAccountCommand::new(email, self.password))
    }
}

impl From<ParseRegisterAccountRequestError> for ApiError {
    fn from(err: ParseRegisterAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterAccountResponseData {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for RegisterAccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            email_verified: account.email_verified,
            created_at: account.created_at,
        }
    }
}
