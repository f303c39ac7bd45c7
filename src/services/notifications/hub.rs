//! Configured set of notification channels.
//!
//! Resolves channel names from [`Settings`] through the [`ChannelRegistry`]
//! and routes notifications to them.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::credentials::Credentials;
use super::provider::NotificationService;
use super::registry::{ChannelContext, ChannelRegistry};
use crate::config::{ChannelSettings, Settings};
use crate::error::{AppError, AppResult};
use crate::external::mail::EmailSender;
use crate::models::Notification;

/// Outcome of checking one configured channel
#[derive(Debug)]
pub struct ChannelCheck {
    pub name: String,
    pub result: AppResult<()>,
}

impl ChannelCheck {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Entry point for sending through configured channels
pub struct NotificationHub {
    registry: ChannelRegistry,
    context: ChannelContext,
    channels: BTreeMap<String, ChannelSettings>,
}

impl NotificationHub {
    pub fn new(
        registry: ChannelRegistry,
        context: ChannelContext,
        channels: BTreeMap<String, ChannelSettings>,
    ) -> Self {
        Self {
            registry,
            context,
            channels,
        }
    }

    /// Hub over the built-in channels and the `[channels]` section
    pub fn from_settings(settings: &Settings, mailer: Arc<dyn EmailSender>) -> Self {
        Self::new(
            ChannelRegistry::builtin(),
            ChannelContext::new(mailer),
            settings.channels.clone(),
        )
    }

    /// Constructs the named channel from its configured credentials
    ///
    /// A registered channel without a `[channels.<name>]` entry is built with
    /// empty credentials.
    ///
    /// # Errors
    /// `UnknownChannel` for unregistered names, `InvalidArgument` when the
    /// channel is disabled, otherwise the channel's construction error
    pub fn open_channel(&self, name: &str) -> AppResult<Box<dyn NotificationService>> {
        let empty = Credentials::new();
        let credentials = match self.channels.get(name) {
            Some(channel) if !channel.enabled => {
                return Err(AppError::invalid_argument(
                    "channel",
                    format!("channel '{}' is disabled", name),
                ));
            }
            Some(channel) => &channel.credentials,
            None => &empty,
        };

        self.registry.create(name, credentials, &self.context)
    }

    /// Opens every enabled configured channel, or only `only` when given
    ///
    /// One entry per channel, in name order; failures are reported, not
    /// returned early.
    pub fn check_channels(&self, only: Option<&str>) -> Vec<ChannelCheck> {
        let names: Vec<String> = match only {
            Some(name) => vec![name.to_string()],
            None => self
                .channels
                .iter()
                .filter(|(_, channel)| channel.enabled)
                .map(|(name, _)| name.clone())
                .collect(),
        };

        names
            .into_iter()
            .map(|name| {
                let result = self
                    .open_channel(&name)
                    .and_then(|service| service.validate_credentials());
                if let Err(ref e) = result {
                    warn!(channel = %name, error = %e, "Channel check failed");
                }
                ChannelCheck { name, result }
            })
            .collect()
    }

    /// Opens `channel` and delivers `notification` to `recipients`
    ///
    /// # Errors
    /// Fails before any delivery when the channel cannot be opened or does
    /// not support the notification type; delivery errors are returned as-is.
    pub async fn send(
        &self,
        channel: &str,
        recipients: &[String],
        notification: &Notification,
    ) -> AppResult<()> {
        let service = self.open_channel(channel)?;

        if !service.supports(notification.kind()) {
            return Err(AppError::invalid_argument(
                "type",
                format!(
                    "channel '{}' does not support {} notifications",
                    channel,
                    notification.kind()
                ),
            ));
        }

        service.notify(recipients, notification).await?;

        info!(
            channel,
            recipients = recipients.len(),
            kind = %notification.kind(),
            "Notification dispatched"
        );
        Ok(())
    }
}
