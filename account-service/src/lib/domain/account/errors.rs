use thiserror::Error;

use crate::organization::errors::OrganizationIdError;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number is empty")]
    Empty,

    #[error("Phone number contains invalid characters (only digits and a leading + allowed)")]
    InvalidCharacters,

    #[error("Phone number must contain between {min} and {max} digits, got {actual}")]
    InvalidLength {
        min: usize,
        max: usize,
        actual: usize,
    },
}

/// Error for personal-information validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonalInformationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a string")]
    NotAString(&'static str),

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneNumberError),
}

/// Error for email delivery operations
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Failed to build email message: {0}")]
    MessageBuild(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Error for directory lookup operations
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    LookupFailed(String),

    #[error("No contact email registered for code: {0}")]
    ContactNotFound(String),

    #[error("Directory returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid organization ID: {0}")]
    InvalidOrganizationId(#[from] OrganizationIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid personal information: {0}")]
    InvalidPersonalInformation(#[from] PersonalInformationError),

    #[error("Password error: {0}")]
    Password(#[from] security::PasswordError),

    // Domain-level errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use: {0}")]
    EmailUnavailable(String),

    #[error("Password does not meet strength requirements")]
    WeakPassword,

    #[error("Email address is already verified")]
    EmailAlreadyVerified,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid or expired magic link")]
    InvalidMagicLink,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No contact email verification is pending")]
    VerificationNotNeeded,

    #[error("Directory lookup failed: {0}")]
    DirectoryLookupFailed(String),

    // Infrastructure errors
    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<MailerError> for AccountError {
    fn from(err: MailerError) -> Self {
        AccountError::EmailDelivery(err.to_string())
    }
}

impl From<DirectoryError> for AccountError {
    fn from(err: DirectoryError) -> Self {
        AccountError::DirectoryLookupFailed(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
