//! Outbound email providers.
//!
//! The email channel hands every message to an [`EmailSender`]. Production
//! code uses [`SendGridSender`]; [`RecordingSender`] captures messages instead
//! of delivering them and backs dry runs and tests.

mod recording;
mod sendgrid;

pub use recording::{RecordedEmail, RecordingSender};
pub use sendgrid::{DEFAULT_API_URL, SendGridConfig, SendGridSender};

use crate::error::AppResult;
use async_trait::async_trait;
use serde::Serialize;

/// A single message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Trait for transactional email providers
///
/// Errors are returned as-is to the caller of the email channel; senders must
/// not retry on their own.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Delivers `email`, authenticating with `api_key`
    async fn send(&self, email: &OutboundEmail, api_key: &str) -> AppResult<()>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;
}
