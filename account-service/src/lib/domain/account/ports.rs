use async_trait::async_trait;

use crate::account::emails::EmailMessage;
use crate::account::errors::AccountError;
use crate::account::errors::DirectoryError;
use crate::account::errors::MailerError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::EmailDispatch;
use crate::account::models::RawPersonalInformation;
use crate::account::models::RegisterAccountCommand;
use crate::organization::models::OrganizationId;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated email and strength-checked password.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created account entity (email unverified)
    ///
    /// # Errors
    /// * `EmailUnavailable` - Email is already registered (checked before strength)
    /// * `WeakPassword` - Password fails the strength requirements
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Authenticate an account with email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    ///
    /// # Returns
    /// Authenticated account entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account, or password mismatch
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError>;

    /// Issue (or re-send) the email-verification token and email.
    ///
    /// # Arguments
    /// * `email` - Address of the account to verify
    /// * `check_before_send` - Skip issuance while the previous token is unexpired
    ///
    /// # Returns
    /// Whether an email was dispatched
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `EmailAlreadyVerified` - Account's email is already verified
    /// * `EmailDelivery` - Mailer failure
    async fn send_verification_email(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError>;

    /// Consume an email-verification token and mark the email verified.
    ///
    /// # Errors
    /// * `InvalidToken` - Empty, unknown, mismatched, or expired token
    async fn verify_email(&self, token: &str) -> Result<Account, AccountError>;

    /// Issue (or re-send) a magic sign-in link.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `EmailDelivery` - Mailer failure
    async fn send_magic_link(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError>;

    /// Consume a magic-link token and sign the account in.
    ///
    /// Increments the account's sign-in count.
    ///
    /// # Errors
    /// * `InvalidMagicLink` - Empty, unknown, mismatched, or expired token
    async fn authenticate_with_magic_link(&self, token: &str) -> Result<Account, AccountError>;

    /// Issue (or re-send) a password-reset token and email.
    ///
    /// A request for an unknown email reports no email sent WITHOUT an
    /// error, so callers cannot probe for account existence.
    ///
    /// # Errors
    /// * `EmailDelivery` - Mailer failure
    async fn send_password_reset_email(
        &self,
        email: &str,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError>;

    /// Consume a password-reset token and rotate the password hash.
    ///
    /// # Errors
    /// * `WeakPassword` - Replacement password fails the strength requirements
    /// * `InvalidToken` - Empty, unknown, mismatched, or expired token
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Account, AccountError>;

    /// Issue (or re-send) the official-contact-email verification.
    ///
    /// The recipient is the official contact email resolved from the
    /// directory service by organization code, not the account's own
    /// address.
    ///
    /// # Errors
    /// * `NotFound` - Account, organization, or membership does not exist
    /// * `VerificationNotNeeded` - Membership does not await verification
    /// * `DirectoryLookupFailed` - Contact-email resolution failed
    /// * `EmailDelivery` - Mailer failure
    async fn send_contact_email_verification(
        &self,
        account_id: &AccountId,
        organization_id: &OrganizationId,
        check_before_send: bool,
    ) -> Result<EmailDispatch, AccountError>;

    /// Consume a contact-email verification token.
    ///
    /// Clears the membership's verification-needed flag.
    ///
    /// # Errors
    /// * `InvalidToken` - Empty, unknown, mismatched, or expired token
    /// * `NotFound` - Membership does not exist
    async fn confirm_contact_email(
        &self,
        token: &str,
        organization_id: &OrganizationId,
    ) -> Result<Account, AccountError>;

    /// Validate and persist an account's personal information.
    ///
    /// Validation runs before any repository call.
    ///
    /// # Errors
    /// * `InvalidPersonalInformation` - Missing, mistyped, or malformed field
    /// * `NotFound` - Account does not exist
    async fn update_personal_information(
        &self,
        account_id: &AccountId,
        raw: RawPersonalInformation,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailUnavailable` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by stored email-verification token.
    ///
    /// Callers must reject empty tokens before the lookup.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by stored magic-link token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_magic_link_token(&self, token: &str)
        -> Result<Option<Account>, AccountError>;

    /// Retrieve account by stored password-reset token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by stored contact-email verification token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_contact_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Update existing account in storage.
    ///
    /// Writes the full entity, so a cleared token slot and the flow's
    /// success mutation land in the same statement.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailUnavailable` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}

/// Transactional email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a templated email.
    ///
    /// # Arguments
    /// * `message` - Recipients, subject, template name, and parameter map
    ///
    /// # Errors
    /// * `InvalidRecipient` - Recipient address rejected by the transport
    /// * `MessageBuild` - Message could not be assembled
    /// * `SendFailed` - Transport failure
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Directory resolution of official organization contacts.
#[async_trait]
pub trait DirectoryLookup: Send + Sync + 'static {
    /// Resolve the official contact email for an organization code.
    ///
    /// # Errors
    /// * `LookupFailed` - Directory unreachable or returned an error
    /// * `ContactNotFound` - Code has no registered contact email
    /// * `InvalidResponse` - Directory payload could not be interpreted
    async fn contact_email(&self, code: &str) -> Result<EmailAddress, DirectoryError>;
}
