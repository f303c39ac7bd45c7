//! In-memory email sender that records messages instead of delivering them.

use super::{EmailSender, OutboundEmail};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A message captured by [`RecordingSender`] together with the key it was sent with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEmail {
    pub email: OutboundEmail,
    pub api_key: String,
}

/// Sender that captures outbound emails
///
/// Clones share the same record, so a clone can be handed to a channel while
/// the original is kept for inspection.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<RecordedEmail>>>,
    failure_message: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sender that rejects every message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure_message: Some(message.into()),
        }
    }

    pub async fn sent(&self) -> Vec<RecordedEmail> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, email: &OutboundEmail, api_key: &str) -> AppResult<()> {
        if let Some(ref message) = self.failure_message {
            return Err(AppError::Provider {
                provider: self.name().to_string(),
                recipient: email.to.clone(),
                source: anyhow::anyhow!(message.clone()),
            });
        }

        self.sent.lock().await.push(RecordedEmail {
            email: email.clone(),
            api_key: api_key.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
