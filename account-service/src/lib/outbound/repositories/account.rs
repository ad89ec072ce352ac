use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AccountError;
use crate::account::errors::PersonalInformationError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::PersonalInformation;
use crate::account::models::PhoneNumber;
use crate::account::models::TokenSlot;
use crate::account::ports::AccountRepository;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, password_hash, email_verified, sign_in_count,
           given_name, family_name, job_title, phone_number,
           email_verification_token, email_verification_sent_at,
           magic_link_token, magic_link_sent_at,
           password_reset_token, password_reset_sent_at,
           contact_email_verification_token, contact_email_verification_sent_at,
           created_at
    FROM accounts
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, clause: &str, value: &str) -> Result<Option<Account>, AccountError> {
        let sql = format!("{} WHERE {} = $1", SELECT_ACCOUNT, clause);

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(|r| row_to_account(&r)).transpose()
    }
}

/// Rebuild a token slot from its column pair.
///
/// The schema keeps value and timestamp as two nullable columns; the slot
/// only exists when both are set.
fn token_slot(value: Option<String>, issued_at: Option<DateTime<Utc>>) -> Option<TokenSlot> {
    match (value, issued_at) {
        (Some(value), Some(issued_at)) => Some(TokenSlot { value, issued_at }),
        _ => None,
    }
}

fn row_to_account(row: &PgRow) -> Result<Account, AccountError> {
    let email: String = row.get("email");

    let given_name: Option<String> = row.get("given_name");
    let family_name: Option<String> = row.get("family_name");
    let job_title: Option<String> = row.get("job_title");
    let phone_number: Option<String> = row.get("phone_number");
    let personal_information = match (given_name, family_name, job_title, phone_number) {
        (Some(given_name), Some(family_name), Some(job_title), Some(phone_number)) => {
            Some(PersonalInformation {
                given_name,
                family_name,
                job_title,
                phone_number: PhoneNumber::new(phone_number)
                    .map_err(PersonalInformationError::from)?,
            })
        }
        _ => None,
    };

    Ok(Account {
        id: AccountId(row.get("id")),
        email: EmailAddress::new(email)?,
        password_hash: row.get("password_hash"),
        email_verified: row.get("email_verified"),
        sign_in_count: row.get("sign_in_count"),
        personal_information,
        email_verification_token: token_slot(
            row.get("email_verification_token"),
            row.get("email_verification_sent_at"),
        ),
        magic_link_token: token_slot(row.get("magic_link_token"), row.get("magic_link_sent_at")),
        password_reset_token: token_slot(
            row.get("password_reset_token"),
            row.get("password_reset_sent_at"),
        ),
        contact_email_verification_token: token_slot(
            row.get("contact_email_verification_token"),
            row.get("contact_email_verification_sent_at"),
        ),
        created_at: row.get("created_at"),
    })
}

fn slot_value(slot: &Option<TokenSlot>) -> Option<&str> {
    slot.as_ref().map(|slot| slot.value.as_str())
}

fn slot_issued_at(slot: &Option<TokenSlot>) -> Option<DateTime<Utc>> {
    slot.as_ref().map(|slot| slot.issued_at)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, email_verified, sign_in_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.email_verified)
        .bind(account.sign_in_count)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key")
                {
                    return AccountError::EmailUnavailable(account.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let sql = format!("{} WHERE id = $1", SELECT_ACCOUNT);

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(|r| row_to_account(&r)).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("email", email).await
    }

    async fn find_by_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        self.find_one("email_verification_token", token).await
    }

    async fn find_by_magic_link_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        self.find_one("magic_link_token", token).await
    }

    async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        self.find_one("password_reset_token", token).await
    }

    async fn find_by_contact_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        self.find_one("contact_email_verification_token", token)
            .await
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let info = account.personal_information.as_ref();

        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2,
                password_hash = $3,
                email_verified = $4,
                sign_in_count = $5,
                given_name = $6,
                family_name = $7,
                job_title = $8,
                phone_number = $9,
                email_verification_token = $10,
                email_verification_sent_at = $11,
                magic_link_token = $12,
                magic_link_sent_at = $13,
                password_reset_token = $14,
                password_reset_sent_at = $15,
                contact_email_verification_token = $16,
                contact_email_verification_sent_at = $17
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.email_verified)
        .bind(account.sign_in_count)
        .bind(info.map(|i| i.given_name.clone()))
        .bind(info.map(|i| i.family_name.clone()))
        .bind(info.map(|i| i.job_title.clone()))
        .bind(info.map(|i| i.phone_number.as_str().to_string()))
        .bind(slot_value(&account.email_verification_token))
        .bind(slot_issued_at(&account.email_verification_token))
        .bind(slot_value(&account.magic_link_token))
        .bind(slot_issued_at(&account.magic_link_token))
        .bind(slot_value(&account.password_reset_token))
        .bind(slot_issued_at(&account.password_reset_token))
        .bind(slot_value(&account.contact_email_verification_token))
        .bind(slot_issued_at(&account.contact_email_verification_token))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key")
                {
                    return AccountError::EmailUnavailable(account.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
