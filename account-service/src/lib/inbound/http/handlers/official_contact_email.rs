use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::EmailDispatchData;
use crate::account::errors::AccountError;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::authenticate::AccountData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::organization::models::OrganizationId;

pub async fn request_contact_email_verification(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
    Path(organization_id): Path<String>,
    Json(body): Json<ContactVerificationRequestBody>,
) -> Result<ApiSuccess<EmailDispatchData>, ApiError> {
    let organization_id =
        OrganizationId::from_string(&organization_id).map_err(AccountError::from)?;

    state
        .account_service
        .send_contact_email_verification(
            &authenticated.account_id,
            &organization_id,
            body.check_before_send,
        )
        .await
        .map_err(ApiError::from)
        .map(|dispatch| ApiSuccess::new(StatusCode::OK, dispatch.into()))
}

pub async fn confirm_contact_email(
    State(state): State<AppState>,
    Json(body): Json<ConfirmContactEmailBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let organization_id =
        OrganizationId::from_string(&body.organization_id).map_err(AccountError::from)?;

    state
        .account_service
        .confirm_contact_email(&body.token, &organization_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ContactVerificationRequestBody {
    #[serde(default)]
    check_before_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmContactEmailBody {
    token: String,
    organization_id: String,
}
