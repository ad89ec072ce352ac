use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::organization::models::Membership;
use crate::organization::models::Organization;
use crate::organization::models::OrganizationId;

/// Persistence operations for organizations and their memberships.
#[async_trait]
pub trait OrganizationRepository: Send + Sync + 'static {
    /// Retrieve organization by identifier.
    ///
    /// # Returns
    /// Optional organization entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, AccountError>;

    /// Retrieve an account's membership in an organization.
    ///
    /// # Returns
    /// Optional membership (None if the account does not belong to the organization)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_member(
        &self,
        organization_id: &OrganizationId,
        account_id: &AccountId,
    ) -> Result<Option<Membership>, AccountError>;

    /// Update a single membership row.
    ///
    /// # Returns
    /// Updated membership
    ///
    /// # Errors
    /// * `NotFound` - Membership does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_member(&self, membership: Membership) -> Result<Membership, AccountError>;
}
