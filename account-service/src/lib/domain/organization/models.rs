use std::fmt;

use uuid::Uuid;

use crate::account::models::AccountId;
use crate::organization::errors::OrganizationIdError;

/// Organization unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganizationId(pub Uuid);

impl OrganizationId {
    /// Generate a new random organization ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an organization ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OrganizationIdError> {
        Uuid::parse_str(s)
            .map(OrganizationId)
            .map_err(|e| OrganizationIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Organization entity.
///
/// The `code` is the external registry identifier handed to the directory
/// service when resolving the official contact email.
#[derive(Debug, Clone)]
pub struct Organization {
    pub id: OrganizationId,
    pub code: String,
    pub name: String,
}

/// Membership of an account in an organization.
#[derive(Debug, Clone)]
pub struct Membership {
    pub organization_id: OrganizationId,
    pub account_id: AccountId,
    pub contact_email_verification_needed: bool,
}
