//! Email notification channel.
//!
//! Validates the configured sender and recipients and hands one message per
//! recipient to an [`EmailSender`].

use super::credentials::Credentials;
use super::provider::{NotificationService, ServiceDescriptor};
use crate::error::AppResult;
use crate::external::mail::{EmailSender, OutboundEmail};
use crate::models::Notification;
use crate::utils::validate_email_address;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Credential key holding the sender address
pub const EMAIL_FIELD: &str = "email";

/// Credential keys accepted for the provider API key, in lookup order
pub const API_KEY_FIELDS: [&str; 2] = ["ssh_key", "api_key"];

/// Email notification channel
///
/// # Example
/// ```ignore
/// let credentials = Credentials::new()
///     .with("email", "alerts@example.com")
///     .with("ssh_key", "SG.xxxxx");
/// let mailer = Arc::new(SendGridSender::new(SendGridConfig::default()));
/// let email = EmailService::new(&credentials, mailer)?;
/// email.notify(&["ops@example.com".to_string()], &Notification::text("disk full")).await?;
/// ```
pub struct EmailService {
    descriptor: ServiceDescriptor,
    sender_address: String,
    api_key: String,
    mailer: Arc<dyn EmailSender>,
}

impl EmailService {
    pub const NAME: &'static str = "email";
    pub const SUPPORTED_TYPES: &'static [&'static str] = &["text"];

    /// Creates the channel, validating credentials first
    ///
    /// # Arguments
    /// * `credentials` - Must contain `email` and `ssh_key` (or `api_key`)
    /// * `mailer` - Provider used to deliver messages
    pub fn new(credentials: &Credentials, mailer: Arc<dyn EmailSender>) -> AppResult<Self> {
        let descriptor = ServiceDescriptor::build(
            Self::NAME,
            credentials,
            Self::SUPPORTED_TYPES,
            check_credentials,
        )
        .inspect_err(|e| warn!(service = Self::NAME, error = %e, "Rejected email credentials"))?;

        let stored = descriptor.credentials();
        let sender_address = stored.require(Self::NAME, EMAIL_FIELD)?.to_string();
        let api_key = stored.require_any(Self::NAME, &API_KEY_FIELDS)?.to_string();

        Ok(Self {
            descriptor,
            sender_address,
            api_key,
            mailer,
        })
    }

    /// The configured sender address
    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    fn build_message(&self, recipient: &str, notification: &Notification) -> OutboundEmail {
        OutboundEmail {
            from: self.sender_address.clone(),
            to: recipient.to_string(),
            subject: notification.content().to_string(),
            body: notification.content().to_string(),
        }
    }
}

/// Checks that the sender address is present, non-null and well formed, and
/// that an API key is present and non-null
fn check_credentials(service: &str, credentials: &Credentials) -> AppResult<()> {
    let email = credentials.require(service, EMAIL_FIELD)?;
    validate_email_address(email)?;
    credentials.require_any(service, &API_KEY_FIELDS)?;
    Ok(())
}

#[async_trait]
impl NotificationService for EmailService {
    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn validate_credentials(&self) -> AppResult<()> {
        check_credentials(self.name(), self.credentials())
    }

    /// Sends one email per recipient, in order
    ///
    /// All recipients are validated before anything is sent; one malformed
    /// address aborts the whole call. Provider errors stop the loop and are
    /// returned unchanged.
    async fn notify(&self, recipients: &[String], notification: &Notification) -> AppResult<()> {
        for recipient in recipients {
            validate_email_address(recipient).inspect_err(|e| {
                warn!(service = Self::NAME, error = %e, "Rejected email recipient")
            })?;
        }

        for recipient in recipients {
            let message = self.build_message(recipient, notification);
            self.mailer.send(&message, &self.api_key).await?;
            info!(
                service = Self::NAME,
                provider = self.mailer.name(),
                to = %recipient,
                "Email notification sent"
            );
        }

        Ok(())
    }
}
