use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::account::errors::DirectoryError;
use crate::account::models::EmailAddress;
use crate::account::ports::DirectoryLookup;
use crate::config::DirectoryConfig;

/// HTTP client for the organization directory.
///
/// Resolves an organization's registry code to its official contact
/// email through a JSON endpoint.
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    contact_email: Option<String>,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_milliseconds))
            .build()
            .map_err(|e| DirectoryError::LookupFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DirectoryLookup for HttpDirectoryClient {
    async fn contact_email(&self, code: &str) -> Result<EmailAddress, DirectoryError> {
        let url = format!("{}/organizations/{}", self.base_url, code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::LookupFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::ContactNotFound(code.to_string()));
        }
        if !response.status().is_success() {
            return Err(DirectoryError::LookupFailed(format!(
                "directory answered {}",
                response.status()
            )));
        }

        let entry: DirectoryEntry = response
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;

        let Some(contact) = entry.contact_email else {
            return Err(DirectoryError::ContactNotFound(code.to_string()));
        };

        EmailAddress::new(contact).map_err(|e| DirectoryError::InvalidResponse(e.to_string()))
    }
}
