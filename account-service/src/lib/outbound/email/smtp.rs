use async_trait::async_trait;
use lettre::message::header;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::account::emails::EmailMessage;
use crate::account::emails::EmailTemplate;
use crate::account::errors::MailerError;
use crate::account::ports::Mailer;
use crate::config::SmtpConfig;

const EMAIL_VERIFICATION_BODY: &str = "Hello,\n\n\
    Please confirm your email address by visiting the link below:\n\n\
    {verification_url}\n\n\
    If you did not create an account you can ignore this email.\n";

const MAGIC_LINK_BODY: &str = "Hello,\n\n\
    Use the link below to sign in:\n\n\
    {login_url}\n\n\
    The link is valid for a short time. If you did not request it you can\n\
    ignore this email.\n";

const PASSWORD_RESET_BODY: &str = "Hello,\n\n\
    You asked to reset your password. Visit the link below to choose a new\n\
    one:\n\n\
    {reset_url}\n\n\
    If you did not ask for a reset you can ignore this email.\n";

const CONTACT_EMAIL_VERIFICATION_BODY: &str = "Hello,\n\n\
    A member of {organization_name} asked to verify this address as the\n\
    organization's official contact. Confirm by visiting the link below:\n\n\
    {confirmation_url}\n";

/// SMTP implementation of the mailer port.
///
/// Renders the template body by substituting `{name}` placeholders with
/// the message's parameter map, then submits through an async STARTTLS
/// relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailerError::SendFailed(e.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| MailerError::InvalidRecipient(e.to_string()))?;

        Ok(Self { transport, from })
    }
}

fn body_template(template: EmailTemplate) -> &'static str {
    match template {
        EmailTemplate::EmailVerification => EMAIL_VERIFICATION_BODY,
        EmailTemplate::MagicLink => MAGIC_LINK_BODY,
        EmailTemplate::PasswordReset => PASSWORD_RESET_BODY,
        EmailTemplate::ContactEmailVerification => CONTACT_EMAIL_VERIFICATION_BODY,
    }
}

/// Substitute `{name}` placeholders with the message's parameter map.
fn render(message: &EmailMessage) -> String {
    let mut body = body_template(message.template).to_string();
    for (key, value) in &message.variables {
        body = body.replace(&format!("{{{}}}", key), value);
    }
    body
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(&message.subject)
            .header(header::ContentType::TEXT_PLAIN);

        for recipient in &message.to {
            let mailbox = recipient
                .as_str()
                .parse::<Mailbox>()
                .map_err(|e| MailerError::InvalidRecipient(e.to_string()))?;
            builder = builder.to(mailbox);
        }

        let email = builder
            .body(render(message))
            .map_err(|e| MailerError::MessageBuild(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        tracing::info!(
            template = message.template.name(),
            recipients = message.to.len(),
            "transactional email sent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::models::EmailAddress;

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let to = EmailAddress::new("user@example.com".to_string()).unwrap();
        let message =
            EmailMessage::magic_link(&to, "tok123", "https://app.example.com");

        let body = render(&message);

        assert!(body.contains("https://app.example.com/magic-link?token=tok123"));
        assert!(!body.contains("{login_url}"));
    }

    #[test]
    fn test_render_leaves_unknown_placeholders_untouched() {
        let to = EmailAddress::new("user@example.com".to_string()).unwrap();
        let mut message =
            EmailMessage::password_reset(&to, "tok123", "https://app.example.com");
        message.variables.remove("reset_url");

        let body = render(&message);

        assert!(body.contains("{reset_url}"));
    }
}
