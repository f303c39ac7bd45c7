//! SendGrid email provider implementation.
//!
//! Posts messages to the SendGrid v3 `mail/send` endpoint using the global
//! `HTTP_CLIENT`.

use super::{EmailSender, OutboundEmail};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Default SendGrid API base URL
pub const DEFAULT_API_URL: &str = "https://api.sendgrid.com/v3";

/// SendGrid API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGridConfig {
    /// SendGrid API base URL (defaults to production).
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Display name attached to the sender address.
    pub from_name: Option<String>,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            from_name: None,
        }
    }
}

/// SendGrid email provider.
pub struct SendGridSender {
    config: SendGridConfig,
}

impl SendGridSender {
    pub fn new(config: SendGridConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!("{}/mail/send", self.config.api_url.trim_end_matches('/'))
    }

    fn build_request(&self, email: &OutboundEmail) -> SendGridRequest {
        SendGridRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: email.to.clone(),
                    name: None,
                }],
            }],
            from: EmailAddress {
                email: email.from.clone(),
                name: self.config.from_name.clone(),
            },
            subject: email.subject.clone(),
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: email.body.clone(),
            }],
        }
    }

    fn provider_error(email: &OutboundEmail, source: anyhow::Error) -> AppError {
        AppError::Provider {
            provider: "sendgrid".to_string(),
            recipient: email.to.clone(),
            source,
        }
    }
}

// SendGrid API request/response structures

#[derive(Debug, Serialize)]
struct SendGridRequest {
    personalizations: Vec<Personalization>,
    from: EmailAddress,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<EmailAddress>,
}

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SendGridError {
    errors: Vec<SendGridErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct SendGridErrorDetail {
    message: String,
}

/// Extracts the error messages from a SendGrid error body, falling back to the raw body
fn parse_error_body(body: &str) -> String {
    match serde_json::from_str::<SendGridError>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join(", "),
        _ => body.to_string(),
    }
}

#[async_trait]
impl EmailSender for SendGridSender {
    async fn send(&self, email: &OutboundEmail, api_key: &str) -> AppResult<()> {
        let start = Instant::now();
        let request = self.build_request(email);

        debug!(
            to = %email.to,
            subject = %email.subject,
            "Sending email via SendGrid"
        );

        let response = HTTP_CLIENT
            .post(self.endpoint())
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::provider_error(email, anyhow::Error::from(e)))?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            debug!(to = %email.to, status = %status, duration_ms, "SendGrid accepted email");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_error_body(&body);
        error!(
            to = %email.to,
            status = %status,
            error = %message,
            duration_ms,
            "Failed to send email via SendGrid"
        );

        Err(Self::provider_error(
            email,
            anyhow::anyhow!("SendGrid error ({}): {}", status, message),
        ))
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}
