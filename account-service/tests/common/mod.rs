use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::emails::EmailMessage;
use account_service::account::errors::AccountError;
use account_service::account::errors::DirectoryError;
use account_service::account::errors::MailerError;
use account_service::account::models::Account;
use account_service::account::models::AccountId;
use account_service::account::models::EmailAddress;
use account_service::account::models::TokenWindows;
use account_service::account::ports::AccountRepository;
use account_service::account::ports::DirectoryLookup;
use account_service::account::ports::Mailer;
use account_service::account::service::AccountService;
use account_service::organization::models::Membership;
use account_service::organization::models::Organization;
use account_service::organization::models::OrganizationId;
use account_service::organization::ports::OrganizationRepository;
use async_trait::async_trait;

/// Test harness wiring the real service to in-memory ports.
///
/// Keeps handles on the adapters so tests can seed state and inspect
/// recorded emails.
pub struct TestApp {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub organizations: Arc<InMemoryOrganizationRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub service: AccountService<
        InMemoryAccountRepository,
        InMemoryOrganizationRepository,
        RecordingMailer,
        StaticDirectory,
    >,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_with_directory(StaticDirectory::new())
    }

    pub fn spawn_with_directory(directory: StaticDirectory) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::default());
        let organizations = Arc::new(InMemoryOrganizationRepository::default());
        let mailer = Arc::new(RecordingMailer::default());

        let service = AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&organizations),
            Arc::clone(&mailer),
            Arc::new(directory),
            TokenWindows::default(),
            "https://app.example.com".to_string(),
        );

        Self {
            accounts,
            organizations,
            mailer,
            service,
        }
    }

    /// Token embedded in the most recently recorded email.
    pub fn last_emailed_token(&self) -> String {
        let messages = self.mailer.sent();
        let message = messages.last().expect("no email was recorded");
        message
            .variables
            .get("token")
            .expect("email carries no token")
            .clone()
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.lock().unwrap().get(id).cloned()
    }

    fn find_where<F>(&self, predicate: F) -> Option<Account>
    where
        F: Fn(&Account) -> bool,
    {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| predicate(account))
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailUnavailable(
                account.email.as_str().to_string(),
            ));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.find_where(|account| account.email.as_str() == email))
    }

    async fn find_by_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.find_where(|account| {
            account
                .email_verification_token
                .as_ref()
                .map(|slot| slot.value == token)
                .unwrap_or(false)
        }))
    }

    async fn find_by_magic_link_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.find_where(|account| {
            account
                .magic_link_token
                .as_ref()
                .map(|slot| slot.value == token)
                .unwrap_or(false)
        }))
    }

    async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.find_where(|account| {
            account
                .password_reset_token
                .as_ref()
                .map(|slot| slot.value == token)
                .unwrap_or(false)
        }))
    }

    async fn find_by_contact_email_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.find_where(|account| {
            account
                .contact_email_verification_token
                .as_ref()
                .map(|slot| slot.value == token)
                .unwrap_or(false)
        }))
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Mutex<HashMap<OrganizationId, Organization>>,
    memberships: Mutex<Vec<Membership>>,
}

impl InMemoryOrganizationRepository {
    pub fn insert_organization(&self, organization: Organization) {
        self.organizations
            .lock()
            .unwrap()
            .insert(organization.id, organization);
    }

    pub fn insert_membership(&self, membership: Membership) {
        self.memberships.lock().unwrap().push(membership);
    }

    pub fn membership(
        &self,
        organization_id: &OrganizationId,
        account_id: &AccountId,
    ) -> Option<Membership> {
        self.memberships
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.organization_id == *organization_id && m.account_id == *account_id)
            .cloned()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, AccountError> {
        Ok(self.organizations.lock().unwrap().get(id).cloned())
    }

    async fn find_member(
        &self,
        organization_id: &OrganizationId,
        account_id: &AccountId,
    ) -> Result<Option<Membership>, AccountError> {
        Ok(self.membership(organization_id, account_id))
    }

    async fn update_member(&self, membership: Membership) -> Result<Membership, AccountError> {
        let mut memberships = self.memberships.lock().unwrap();
        let Some(existing) = memberships.iter_mut().find(|m| {
            m.organization_id == membership.organization_id
                && m.account_id == membership.account_id
        }) else {
            return Err(AccountError::NotFound(format!(
                "membership of {} in {}",
                membership.account_id, membership.organization_id
            )));
        };
        *existing = membership.clone();
        Ok(membership)
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    messages: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct StaticDirectory {
    contacts: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self {
            contacts: HashMap::new(),
        }
    }

    pub fn with_contact(mut self, code: &str, email: &str) -> Self {
        self.contacts.insert(code.to_string(), email.to_string());
        self
    }
}

#[async_trait]
impl DirectoryLookup for StaticDirectory {
    async fn contact_email(&self, code: &str) -> Result<EmailAddress, DirectoryError> {
        let Some(contact) = self.contacts.get(code).cloned() else {
            return Err(DirectoryError::ContactNotFound(code.to_string()));
        };
        EmailAddress::new(contact).map_err(|e| DirectoryError::InvalidResponse(e.to_string()))
    }
}
