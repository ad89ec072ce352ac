use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::RawPersonalInformation;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_personal_information(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(body): Json<RawPersonalInformation>,
) -> Result<ApiSuccess<PersonalInformationData>, ApiError> {
    let account_id = AccountId::from_string(&account_id).map_err(AccountError::from)?;

    state
        .account_service
        .update_personal_information(&account_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInformationData {
    pub id: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub job_title: Option<String>,
    pub phone_number: Option<String>,
}

impl From<&Account> for PersonalInformationData {
    fn from(account: &Account) -> Self {
        let info = account.personal_information.as_ref();
        Self {
            id: account.id.to_string(),
            given_name: info.map(|i| i.given_name.clone()),
            family_name: info.map(|i| i.family_name.clone()),
            job_title: info.map(|i| i.job_title.clone()),
            phone_number: info.map(|i| i.phone_number.as_str().to_string()),
        }
    }
}
