use std::collections::HashMap;

use crate::account::models::EmailAddress;
use crate::organization::models::Organization;

/// Transactional email templates known to the mailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    EmailVerification,
    MagicLink,
    PasswordReset,
    ContactEmailVerification,
}

impl EmailTemplate {
    /// Get the template name.
    ///
    /// # Returns
    /// Template name string
    pub fn name(&self) -> &'static str {
        match self {
            EmailTemplate::EmailVerification => "email_verification",
            EmailTemplate::MagicLink => "magic_link",
            EmailTemplate::PasswordReset => "password_reset",
            EmailTemplate::ContactEmailVerification => "contact_email_verification",
        }
    }
}

/// Outbound transactional email.
///
/// Carries the recipient list, subject, template name, and the parameter
/// map the mailer substitutes into the template body.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub template: EmailTemplate,
    pub variables: HashMap<String, String>,
}

impl EmailMessage {
    /// Build the email-verification message for an account.
    pub fn email_verification(to: &EmailAddress, token: &str, base_url: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert("token".to_string(), token.to_string());
        variables.insert(
            "verification_url".to_string(),
            format!("{}/verify-email?token={}", base_url, token),
        );

        Self {
            to: vec![to.clone()],
            subject: "Verify your email address".to_string(),
            template: EmailTemplate::EmailVerification,
            variables,
        }
    }

    /// Build the magic-link login message for an account.
    pub fn magic_link(to: &EmailAddress, token: &str, base_url: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert("token".to_string(), token.to_string());
        variables.insert(
            "login_url".to_string(),
            format!("{}/magic-link?token={}", base_url, token),
        );

        Self {
            to: vec![to.clone()],
            subject: "Your sign-in link".to_string(),
            template: EmailTemplate::MagicLink,
            variables,
        }
    }

    /// Build the password-reset message for an account.
    pub fn password_reset(to: &EmailAddress, token: &str, base_url: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert("token".to_string(), token.to_string());
        variables.insert(
            "reset_url".to_string(),
            format!("{}/reset-password?token={}", base_url, token),
        );

        Self {
            to: vec![to.clone()],
            subject: "Reset your password".to_string(),
            template: EmailTemplate::PasswordReset,
            variables,
        }
    }

    /// Build the contact-email verification message for an organization.
    ///
    /// Addressed to the official contact email resolved from the
    /// directory, not to the requesting account. The confirmation link
    /// carries the organization id alongside the token so the consuming
    /// flow can clear the right membership flag.
    pub fn contact_email_verification(
        to: &EmailAddress,
        organization: &Organization,
        token: &str,
        base_url: &str,
    ) -> Self {
        let mut variables = HashMap::new();
        variables.insert("token".to_string(), token.to_string());
        variables.insert("organization_name".to_string(), organization.name.clone());
        variables.insert(
            "confirmation_url".to_string(),
            format!(
                "{}/organizations/official-contact/confirm?token={}&organization_id={}",
                base_url, token, organization.id
            ),
        );

        Self {
            to: vec![to.clone()],
            subject: "Verify your organization's contact email".to_string(),
            template: EmailTemplate::ContactEmailVerification,
            variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::organization::models::OrganizationId;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_email_verification_message_carries_token_link() {
        let message = EmailMessage::email_verification(
            &email("user@example.com"),
            "tok123",
            "https://app.example.com",
        );

        assert_eq!(message.to.len(), 1);
        assert_eq!(message.to[0].as_str(), "user@example.com");
        assert_eq!(message.template.name(), "email_verification");
        assert_eq!(
            message.variables.get("verification_url").unwrap(),
            "https://app.example.com/verify-email?token=tok123"
        );
    }

    #[test]
    fn test_contact_verification_link_embeds_organization_id() {
        let organization_id = OrganizationId(Uuid::new_v4());
        let organization = Organization {
            id: organization_id,
            code: "0123456A".to_string(),
            name: "Example Org".to_string(),
        };

        let message = EmailMessage::contact_email_verification(
            &email("contact@example.org"),
            &organization,
            "tok456",
            "https://app.example.com",
        );

        let url = message.variables.get("confirmation_url").unwrap();
        assert!(url.contains("token=tok456"));
        assert!(url.contains(&format!("organization_id={}", organization_id)));
        assert_eq!(
            message.variables.get("organization_name").unwrap(),
            "Example Org"
        );
    }
}
