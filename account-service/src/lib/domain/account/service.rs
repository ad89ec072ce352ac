use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use security::password::meets_strength_requirements;
use security::PasswordHasher;
use security::TokenGenerator;

use crate::account::emails::EmailMessage;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailDispatch;
use crate::account::models::PersonalInformation;
use crate::account::models::RawPersonalInformation;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::TokenSlot;
use crate::account::models::TokenWindows;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::DirectoryLookup;
use crate::account::ports::Mailer;
use crate::organization::models::OrganizationId;
use crate::organization::ports::OrganizationRepository;

/// Domain service implementation for account flows.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, OR, M, D>
where
    AR: AccountRepository,
    OR: OrganizationRepository,
    M: Mailer,
    D: DirectoryLookup,
{
    accounts: Arc<AR>,
    organizations: Arc<OR>,
    mailer: Arc<M>,
    directory: Arc<D>,
    password_hasher: PasswordHasher,
    token_generator: TokenGenerator,
    token_windows: TokenWindows,
    base_url: String,
}

impl<AR, OR, M, D> AccountService<AR, OR, M, D>
where
    AR: AccountRepository,
    OR: OrganizationRepository,
    M: Mailer,
    D: DirectoryLookup,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `organizations` - Organization persistence implementation
    /// * `mailer` - Transactional email delivery implementation
    /// * `directory` - Official-contact directory implementation
    /// * `token_windows` - Per-flow token validity windows
    /// * `base_url` - Public base URL embedded in emailed links
    pub fn new(
        accounts: Arc<AR>,
        organizations: Arc<OR>,
        mailer: Arc<M>,
        directory: Arc<D>,
        token_windows: TokenWindows,
        base_url: String,
    ) -> Self {
        Self {
            accounts,
            organizations,
            mailer,
            directory,
            password_hasher: PasswordHasher::new(),
            token_generator: TokenGenerator::new(),
            token_windows,
            base_url,
        }
    }
}

/// Whether a slot currently holds an unexpired token.
fn still_valid(slot: &Option<TokenSlot>, window_minutes: i64) -> bool {
    slot.as_ref()
        .map(|slot| !slot.expired(window_minutes))
        .unwrap_or(false)
}

/// Whether a candidate token can consume the slot: it must match the
/// stored value and the window must not have elapsed.
fn consumable(slot: &Option<TokenSlot>, candidate: &str, window_minutes: i64) -> bool {
    slot.as_ref()
        .map(|slot| slot.matches(candidate) && !slot.expired(window_minutes))
        .unwrap_or(false)
}

#[async_trait]
impl<AR, OR, M, D> AccountServicePort for AccountService<AR, OR, M, D>
where
    AR: AccountRepository,
    OR: OrganizationRepository,
    M: Mailer,
    D: DirectoryLookup,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        // Email availability is checked before password strength
        if self
            .accounts
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailUnavailable(
                command.email.as_str().to_string(),
            ));
        }

        if !meets_strength_requirements(&command.password) {
            return Err(AccountError::WeakPassword);
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            email_verified: false,
            sign_in_count: 0,
            personal_information: None,
            email_verification_token: None,
            magic_link_token: None,
            password_reset_token: None,
            contact_email_verification_token: None,
            created_at: Utc::now(),
        };

        self.accounts.create(account).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        // Missing account and mismatched password collapse into the same
        // error kind so callers cannot enumerate registered emails.
        let Some(account) = self.accounts.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        let matches = self
            .password_hasher
            .verify(password, &account.password_hash)?;
        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    async fn send_verification_email(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            return Err(AccountError::NotFound(email.to_string()));
        };

        if account.email_verified {
            return Err(AccountError::EmailAlreadyVerified);
        }

        if check_before_send
            && still_valid(
                &account.email_verification_token,
                self.token_windows.email_verification_minutes,
            )
        {
            return Ok(EmailDispatch::skipped());
        }

        let token = self.token_generator.generate();
        account.email_verification_token = Some(TokenSlot::issue(token.clone()));
        let account = self.accounts.update(account).await?;

        let message = EmailMessage::email_verification(&account.email, &token, &self.base_url);
        self.mailer.send(&message).await?;

        Ok(EmailDispatch::sent())
    }

    async fn verify_email(&self, token: &str) -> Result<Account, AccountError> {
        // An empty token would act as a wildcard in the lookup layer
        if token.trim().is_empty() {
            return Err(AccountError::InvalidToken);
        }

        let Some(mut account) = self.accounts.find_by_email_verification_token(token).await? else {
            return Err(AccountError::InvalidToken);
        };

        if !consumable(
            &account.email_verification_token,
            token,
            self.token_windows.email_verification_minutes,
        ) {
            return Err(AccountError::InvalidToken);
        }

        account.email_verification_token = None;
        account.email_verified = true;
        self.accounts.update(account).await
    }

    async fn send_magic_link(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            return Err(AccountError::NotFound(email.to_string()));
        };

        if check_before_send
            && still_valid(
                &account.magic_link_token,
                self.token_windows.magic_link_minutes,
            )
        {
            return Ok(EmailDispatch::skipped());
        }

        let token = self.token_generator.generate();
        account.magic_link_token = Some(TokenSlot::issue(token.clone()));
        let account = self.accounts.update(account).await?;

        let message = EmailMessage::magic_link(&account.email, &token, &self.base_url);
        self.mailer.send(&message).await?;

        Ok(EmailDispatch::sent())
    }

    async fn authenticate_with_magic_link(&self, token: &str) -> Result<Account, AccountError> {
        if token.trim().is_empty() {
            return Err(AccountError::InvalidMagicLink);
        }

        let Some(mut account) = self.accounts.find_by_magic_link_token(token).await? else {
            return Err(AccountError::InvalidMagicLink);
        };

        if !consumable(
            &account.magic_link_token,
            token,
            self.token_windows.magic_link_minutes,
        ) {
            return Err(AccountError::InvalidMagicLink);
        }

        account.magic_link_token = None;
        account.sign_in_count += 1;
        self.accounts.update(account).await
    }

    async fn send_password_reset_email(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError> {
        // Unknown emails are swallowed on purpose: the response must not
        // reveal whether an account exists.
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            tracing::info!("password reset requested for unknown email");
            return Ok(EmailDispatch::skipped());
        };

        if check_before_send
            && still_valid(
                &account.password_reset_token,
                self.token_windows.password_reset_minutes,
            )
        {
            return Ok(EmailDispatch::skipped());
        }

        let token = self.token_generator.generate();
        account.password_reset_token = Some(TokenSlot::issue(token.clone()));
        let account = self.accounts.update(account).await?;

        let message = EmailMessage::password_reset(&account.email, &token, &self.base_url);
        self.mailer.send(&message).await?;

        Ok(EmailDispatch::sent())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Account, AccountError> {
        if token.trim().is_empty() {
            return Err(AccountError::InvalidToken);
        }

        // Checked before the lookup so a weak submission leaves the
        // outstanding token unconsumed.
        if !meets_strength_requirements(new_password) {
            return Err(AccountError::WeakPassword);
        }

        let Some(mut account) = self.accounts.find_by_password_reset_token(token).await? else {
            return Err(AccountError::InvalidToken);
        };

        if !consumable(
            &account.password_reset_token,
            token,
            self.token_windows.password_reset_minutes,
        ) {
            return Err(AccountError::InvalidToken);
        }

        account.password_hash = self.password_hasher.hash(new_password)?;
        account.password_reset_token = None;
        self.accounts.update(account).await
    }

    async fn send_contact_email_verification(
        &self,
        account_id: &AccountId,
        organization_id: &OrganizationId,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError> {
        let Some(mut account) = self.accounts.find_by_id(account_id).await? else {
            return Err(AccountError::NotFound(account_id.to_string()));
        };

        let Some(organization) = self.organizations.find_by_id(organization_id).await? else {
            return Err(AccountError::NotFound(organization_id.to_string()));
        };

        let Some(membership) = self
            .organizations
            .find_member(organization_id, account_id)
            .await?
        else {
            return Err(AccountError::NotFound(format!(
                "membership of {} in {}",
                account_id, organization_id
            )));
        };

        if !membership.contact_email_verification_needed {
            return Err(AccountError::VerificationNotNeeded);
        }

        if check_before_send
            && still_valid(
                &account.contact_email_verification_token,
                self.token_windows.contact_email_verification_minutes,
            )
        {
            return Ok(EmailDispatch::skipped());
        }

        let contact_email = self.directory.contact_email(&organization.code).await?;

        let token = self.token_generator.generate();
        account.contact_email_verification_token = Some(TokenSlot::issue(token.clone()));
        self.accounts.update(account).await?;

        let message = EmailMessage::contact_email_verification(
            &contact_email,
            &organization,
            &token,
            &self.base_url,
        );
        self.mailer.send(&message).await?;

        Ok(EmailDispatch::sent())
    }

    async fn confirm_contact_email(
        &self,
        token: &str,
        organization_id: &OrganizationId,
    ) -> Result<Account, AccountError> {
        if token.trim().is_empty() {
            return Err(AccountError::InvalidToken);
        }

        let Some(mut account) = self
            .accounts
            .find_by_contact_email_verification_token(token)
            .await?
        else {
            return Err(AccountError::InvalidToken);
        };

        if !consumable(
            &account.contact_email_verification_token,
            token,
            self.token_windows.contact_email_verification_minutes,
        ) {
            return Err(AccountError::InvalidToken);
        }

        account.contact_email_verification_token = None;
        let account = self.accounts.update(account).await?;

        let Some(mut membership) = self
            .organizations
            .find_member(organization_id, &account.id)
            .await?
        else {
            return Err(AccountError::NotFound(format!(
                "membership of {} in {}",
                account.id, organization_id
            )));
        };

        membership.contact_email_verification_needed = false;
        self.organizations.update_member(membership).await?;

        Ok(account)
    }

    async fn update_personal_information(
        &self,
        account_id: &AccountId,
        raw: RawPersonalInformation,
    ) -> Result<Account, AccountError> {
        // Validation runs before any repository access
        let information = PersonalInformation::parse(raw)?;

        let Some(mut account) = self.accounts.find_by_id(account_id).await? else {
            return Err(AccountError::NotFound(account_id.to_string()));
        };

        account.personal_information = Some(information);
        self.accounts.update(account).await
    }
}
