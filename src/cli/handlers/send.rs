//! Send command handler

use std::sync::Arc;

use validator::Validate;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::mail::{EmailSender, RecordedEmail, RecordingSender, SendGridSender};
use crate::models::Notification;
use crate::services::notifications::NotificationHub;

/// Arguments of one `send` invocation
#[derive(Debug, Clone, Validate)]
pub struct SendRequest {
    #[validate(length(min = 1, message = "Channel is required"))]
    pub channel: String,
    pub kind: String,
    pub content: String,
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub recipients: Vec<String>,
}

/// Sends a notification, or records it when running dry
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Builds the notification and hands it to the requested channel
    ///
    /// On a dry run nothing leaves the process; the messages the email
    /// channel would have sent are printed as JSON lines instead.
    pub async fn execute(&self, request: &SendRequest, dry_run: bool) -> AppResult<()> {
        request
            .validate()
            .map_err(|e| AppError::invalid_argument("send", e.to_string()))?;
        let notification = Notification::new(&request.kind, request.content.as_str())?;

        if dry_run {
            let recorded = self.record(request, &notification).await?;
            for line in render_recorded(&recorded)? {
                println!("{}", line);
            }
            println!(
                "Dry run: {} message(s) would be sent via {}",
                recorded.len(),
                request.channel
            );
            return Ok(());
        }

        let mailer: Arc<dyn EmailSender> =
            Arc::new(SendGridSender::new(self.config.mail.to_sendgrid_config()));
        NotificationHub::from_settings(&self.config, mailer)
            .send(&request.channel, &request.recipients, &notification)
            .await?;

        println!(
            "Sent {} notification to {} recipient(s) via {}",
            notification.kind(),
            request.recipients.len(),
            request.channel
        );
        Ok(())
    }

    /// Runs the full send path against a [`RecordingSender`]
    pub async fn record(
        &self,
        request: &SendRequest,
        notification: &Notification,
    ) -> AppResult<Vec<RecordedEmail>> {
        let recorder = RecordingSender::new();
        NotificationHub::from_settings(&self.config, Arc::new(recorder.clone()))
            .send(&request.channel, &request.recipients, notification)
            .await?;
        Ok(recorder.sent().await)
    }
}

/// JSON lines for recorded messages; API keys are left out
fn render_recorded(recorded: &[RecordedEmail]) -> AppResult<Vec<String>> {
    recorded
        .iter()
        .map(|entry| {
            serde_json::to_string(&entry.email).map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })
        })
        .collect()
}
