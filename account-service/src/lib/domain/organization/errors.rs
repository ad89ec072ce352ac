use thiserror::Error;

/// Error for OrganizationId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrganizationIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}
