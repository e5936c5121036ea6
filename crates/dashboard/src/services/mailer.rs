//! Outbound mail transport.
//!
//! Uses SMTP via lettre (STARTTLS relay) for delivery. Every message gets a
//! freshly generated `Message-ID`, which is what callers get back on success.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EmailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error. Displays the transport's own message.
    #[error(transparent)]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// The transport refused the message for a reason outside SMTP itself.
    #[error("{0}")]
    Rejected(String),
}

/// A plain-text email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

/// Something that can deliver an [`OutboundEmail`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send the email and return the transport-assigned message identifier.
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError>;
}

/// SMTP mail transport.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new SMTP transport from configuration.
    ///
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be configured or the sender address
    /// is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidAddress(config.from_address.clone()))?;

        Ok(Self { mailer, from })
    }

    /// Build a lettre message, returning it with its `Message-ID`.
    fn build_message(&self, email: &OutboundEmail) -> Result<(Message, String), MailError> {
        let message_id = new_message_id(self.from.email.domain());

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.as_str())
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN);

        for recipient in &email.to {
            builder = builder.to(recipient
                .parse()
                .map_err(|_| MailError::InvalidAddress(recipient.clone()))?);
        }

        Ok((builder.body(email.text.clone())?, message_id))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        let (message, message_id) = self.build_message(email)?;

        self.mailer.send(message).await?;

        tracing::info!(
            recipients = email.to.len(),
            subject = %email.subject,
            message_id = %message_id,
            "Email sent successfully"
        );
        Ok(message_id)
    }
}

/// Generate an RFC 5322 message identifier under the sender's domain.
fn new_message_id(domain: &str) -> String {
    format!("<{}@{domain}>", Uuid::new_v4())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(&EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: SecretString::from("hunter2".to_string()),
            from_address: "no-reply@SecondNature.com".to_string(),
        })
        .unwrap()
    }

    fn email(to: &[&str]) -> OutboundEmail {
        OutboundEmail {
            to: to.iter().map(ToString::to_string).collect(),
            subject: "Install Dates for User 123".to_string(),
            text: "Selected Install Dates:\n".to_string(),
        }
    }

    #[test]
    fn test_message_ids_are_unique() {
        let first = new_message_id("secondnature.com");
        let second = new_message_id("secondnature.com");
        assert_ne!(first, second);
        assert!(first.starts_with('<'));
        assert!(first.ends_with("@secondnature.com>"));
    }

    #[tokio::test]
    async fn test_build_message_sets_headers() {
        let (message, message_id) = mailer()
            .build_message(&email(&["a@example.com", "b@example.com"]))
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains(&format!("Message-ID: {message_id}")));
        assert!(formatted.contains("Subject: Install Dates for User 123"));
        assert!(formatted.contains("a@example.com"));
        assert!(formatted.contains("b@example.com"));
        assert!(message_id.ends_with("@SecondNature.com>"));
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let result = mailer().build_message(&email(&["not an address"]));
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_invalid_sender_rejected() {
        let result = SmtpMailer::new(&EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: SecretString::from("hunter2".to_string()),
            from_address: "nobody".to_string(),
        });
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }
}
