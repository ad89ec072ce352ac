use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PersonalInformationError;
use crate::account::errors::PhoneNumberError;

/// Account aggregate entity.
///
/// Holds identity, authentication material, verification state, and one
/// ephemeral credential slot per verification flow. A slot and its
/// issuance timestamp are always absent or present together, which the
/// `Option<TokenSlot>` encoding guarantees by construction.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub email_verified: bool,
    pub sign_in_count: i64,
    pub personal_information: Option<PersonalInformation>,
    pub email_verification_token: Option<TokenSlot>,
    pub magic_link_token: Option<TokenSlot>,
    pub password_reset_token: Option<TokenSlot>,
    pub contact_email_verification_token: Option<TokenSlot>,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Accepts an optional leading `+` followed by 6 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 6;
    const MAX_DIGITS: usize = 15;

    /// Create a new validated phone number.
    ///
    /// # Errors
    /// * `Empty` - No digits supplied
    /// * `InvalidCharacters` - Anything other than digits after the optional `+`
    /// * `InvalidLength` - Digit count outside the accepted range
    pub fn new(phone: String) -> Result<Self, PhoneNumberError> {
        let trimmed = phone.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::InvalidCharacters);
        }

        let count = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&count) {
            return Err(PhoneNumberError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                actual: count,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get phone number as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ephemeral credential stored on an account.
///
/// Pairs a token value with its issuance timestamp. Cleared exactly once,
/// on successful consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSlot {
    pub value: String,
    pub issued_at: DateTime<Utc>,
}

impl TokenSlot {
    /// Record a freshly issued token with the current timestamp.
    pub fn issue(value: String) -> Self {
        Self {
            value,
            issued_at: Utc::now(),
        }
    }

    /// Whether the candidate equals the stored token value.
    pub fn matches(&self, candidate: &str) -> bool {
        self.value == candidate
    }

    /// Whether this token's validity window has elapsed.
    pub fn expired(&self, window_minutes: i64) -> bool {
        token_window_elapsed(Some(self.issued_at), window_minutes)
    }
}

/// Expiration predicate shared by all token flows.
///
/// An absent issuance timestamp is treated as expired. Otherwise the
/// token has expired once more than `window_minutes` have passed since
/// issuance. Pure and side-effect free.
pub fn token_window_elapsed(issued_at: Option<DateTime<Utc>>, window_minutes: i64) -> bool {
    match issued_at {
        None => true,
        Some(issued_at) => Utc::now() - issued_at > Duration::minutes(window_minutes),
    }
}

/// Validity windows, in minutes, for each token flow.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenWindows {
    pub email_verification_minutes: i64,
    pub magic_link_minutes: i64,
    pub password_reset_minutes: i64,
    pub contact_email_verification_minutes: i64,
}

impl Default for TokenWindows {
    fn default() -> Self {
        Self {
            email_verification_minutes: 24 * 60,
            magic_link_minutes: 15,
            password_reset_minutes: 60,
            contact_email_verification_minutes: 24 * 60,
        }
    }
}

/// Validated personal information attached to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInformation {
    pub given_name: String,
    pub family_name: String,
    pub job_title: String,
    pub phone_number: PhoneNumber,
}

/// Personal information as submitted, before validation.
///
/// Fields are kept as raw JSON values so that a wrong type (e.g. a number
/// where a name is expected) is reported as a validation failure rather
/// than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPersonalInformation {
    #[serde(default)]
    pub given_name: serde_json::Value,
    #[serde(default)]
    pub family_name: serde_json::Value,
    #[serde(default)]
    pub job_title: serde_json::Value,
    #[serde(default)]
    pub phone_number: serde_json::Value,
}

impl PersonalInformation {
    /// Validate raw submitted values into personal information.
    ///
    /// Each of the three free-text fields must be a present, non-empty
    /// string; the phone number must additionally have a valid shape.
    ///
    /// # Errors
    /// * `MissingField` - Field absent or null
    /// * `NotAString` - Field present with a non-string type
    /// * `EmptyField` - Field is a blank string
    /// * `Phone` - Phone number shape is invalid
    pub fn parse(raw: RawPersonalInformation) -> Result<Self, PersonalInformationError> {
        let given_name = required_text("given_name", &raw.given_name)?;
        let family_name = required_text("family_name", &raw.family_name)?;
        let job_title = required_text("job_title", &raw.job_title)?;
        let phone_number = required_text("phone_number", &raw.phone_number)?;
        let phone_number = PhoneNumber::new(phone_number)?;

        Ok(Self {
            given_name,
            family_name,
            job_title,
            phone_number,
        })
    }
}

fn required_text(
    field: &'static str,
    value: &serde_json::Value,
) -> Result<String, PersonalInformationError> {
    match value {
        serde_json::Value::Null => Err(PersonalInformationError::MissingField(field)),
        serde_json::Value::String(s) if s.trim().is_empty() => {
            Err(PersonalInformationError::EmptyField(field))
        }
        serde_json::Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(PersonalInformationError::NotAString(field)),
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterAccountCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (strength-checked and hashed by the service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Outcome of an issue-or-resend flow.
///
/// Reports whether an email was actually dispatched; a skipped send is
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailDispatch {
    pub email_sent: bool,
}

impl EmailDispatch {
    /// An email was generated and handed to the mailer.
    pub fn sent() -> Self {
        Self { email_sent: true }
    }

    /// Issuance was skipped because the previous token is still valid.
    pub fn skipped() -> Self {
        Self { email_sent: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(
        given_name: serde_json::Value,
        family_name: serde_json::Value,
        job_title: serde_json::Value,
        phone_number: serde_json::Value,
    ) -> RawPersonalInformation {
        RawPersonalInformation {
            given_name,
            family_name,
            job_title,
            phone_number,
        }
    }

    #[test]
    fn test_email_address_accepts_valid_email() {
        let email = EmailAddress::new("user@example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_address_rejects_invalid_email() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_phone_number_accepts_digits_with_optional_plus() {
        assert!(PhoneNumber::new("0612345678".to_string()).is_ok());
        assert!(PhoneNumber::new("+33612345678".to_string()).is_ok());
    }

    #[test]
    fn test_phone_number_rejects_bad_shapes() {
        assert!(matches!(
            PhoneNumber::new("".to_string()),
            Err(PhoneNumberError::Empty)
        ));
        assert!(matches!(
            PhoneNumber::new("06 12 34".to_string()),
            Err(PhoneNumberError::InvalidCharacters)
        ));
        assert!(matches!(
            PhoneNumber::new("12345".to_string()),
            Err(PhoneNumberError::InvalidLength { .. })
        ));
        assert!(matches!(
            PhoneNumber::new("1234567890123456".to_string()),
            Err(PhoneNumberError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_window_elapsed_when_timestamp_absent() {
        assert!(token_window_elapsed(None, 60));
        assert!(token_window_elapsed(None, 0));
    }

    #[test]
    fn test_window_not_elapsed_for_fresh_timestamp() {
        let issued_at = Utc::now() - Duration::minutes(5);
        assert!(!token_window_elapsed(Some(issued_at), 60));
    }

    #[test]
    fn test_window_elapsed_for_old_timestamp() {
        let issued_at = Utc::now() - Duration::minutes(61);
        assert!(token_window_elapsed(Some(issued_at), 60));
    }

    #[test]
    fn test_token_slot_expiry_and_match() {
        let slot = TokenSlot::issue("abc123".to_string());
        assert!(slot.matches("abc123"));
        assert!(!slot.matches("abc124"));
        assert!(!slot.expired(15));

        let stale = TokenSlot {
            value: "abc123".to_string(),
            issued_at: Utc::now() - Duration::minutes(16),
        };
        assert!(stale.expired(15));
    }

    #[test]
    fn test_personal_information_parses_valid_input() {
        let info = PersonalInformation::parse(raw(
            json!("Ada"),
            json!("Lovelace"),
            json!("Engineer"),
            json!("+33612345678"),
        ))
        .unwrap();

        assert_eq!(info.given_name, "Ada");
        assert_eq!(info.family_name, "Lovelace");
        assert_eq!(info.job_title, "Engineer");
        assert_eq!(info.phone_number.as_str(), "+33612345678");
    }

    #[test]
    fn test_personal_information_rejects_missing_field() {
        let result = PersonalInformation::parse(raw(
            json!(null),
            json!("Lovelace"),
            json!("Engineer"),
            json!("+33612345678"),
        ));
        assert_eq!(
            result.unwrap_err(),
            PersonalInformationError::MissingField("given_name")
        );
    }

    #[test]
    fn test_personal_information_rejects_non_string_field() {
        let result = PersonalInformation::parse(raw(
            json!(42),
            json!("Lovelace"),
            json!("Engineer"),
            json!("+33612345678"),
        ));
        assert_eq!(
            result.unwrap_err(),
            PersonalInformationError::NotAString("given_name")
        );
    }

    #[test]
    fn test_personal_information_rejects_blank_field() {
        let result = PersonalInformation::parse(raw(
            json!("Ada"),
            json!("   "),
            json!("Engineer"),
            json!("+33612345678"),
        ));
        assert_eq!(
            result.unwrap_err(),
            PersonalInformationError::EmptyField("family_name")
        );
    }

    #[test]
    fn test_personal_information_rejects_invalid_phone() {
        let result = PersonalInformation::parse(raw(
            json!("Ada"),
            json!("Lovelace"),
            json!("Engineer"),
            json!("not-a-phone"),
        ));
        assert!(matches!(
            result.unwrap_err(),
            PersonalInformationError::Phone(_)
        ));
    }
}
