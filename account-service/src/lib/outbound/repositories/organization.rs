use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::organization::models::Membership;
use crate::organization::models::Organization;
use crate::organization::models::OrganizationId;
use crate::organization::ports::OrganizationRepository;

pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, code, name
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| Organization {
            id: OrganizationId(r.get("id")),
            code: r.get("code"),
            name: r.get("name"),
        }))
    }

    async fn find_member(
        &self,
        organization_id: &OrganizationId,
        account_id: &AccountId,
    ) -> Result<Option<Membership>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT organization_id, account_id, contact_email_verification_needed
            FROM memberships
            WHERE organization_id = $1 AND account_id = $2
            "#,
        )
        .bind(organization_id.0)
        .bind(account_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| Membership {
            organization_id: OrganizationId(r.get("organization_id")),
            account_id: AccountId(r.get("account_id")),
            contact_email_verification_needed: r.get("contact_email_verification_needed"),
        }))
    }

    async fn update_member(&self, membership: Membership) -> Result<Membership, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET contact_email_verification_needed = $3
            WHERE organization_id = $1 AND account_id = $2
            "#,
        )
        .bind(membership.organization_id.0)
        .bind(membership.account_id.0)
        .bind(membership.contact_email_verification_needed)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(format!(
                "membership of {} in {}",
                membership.account_id, membership.organization_id
            )));
        }

        Ok(membership)
    }
}
