//! Channels whose provider integration does not exist yet.
//!
//! Each one accepts any credentials and treats `notify` as a successful
//! no-op, so callers can already wire them through the registry.

use super::credentials::Credentials;
use super::provider::{NotificationService, ServiceDescriptor};
use crate::error::AppResult;
use crate::models::Notification;
use async_trait::async_trait;

macro_rules! placeholder_channel {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            descriptor: ServiceDescriptor,
        }

        impl $ty {
            pub const NAME: &'static str = $name;
            pub const SUPPORTED_TYPES: &'static [&'static str] = &["text"];

            pub fn new(credentials: &Credentials) -> AppResult<Self> {
                let descriptor = ServiceDescriptor::build(
                    Self::NAME,
                    credentials,
                    Self::SUPPORTED_TYPES,
                    |_, _| Ok(()),
                )?;
                Ok(Self { descriptor })
            }
        }

        #[async_trait]
        impl NotificationService for $ty {
            fn descriptor(&self) -> &ServiceDescriptor {
                &self.descriptor
            }

            fn validate_credentials(&self) -> AppResult<()> {
                Ok(())
            }

            async fn notify(
                &self,
                _recipients: &[String],
                _notification: &Notification,
            ) -> AppResult<()> {
                Ok(())
            }
        }
    };
}

placeholder_channel!(
    /// SMS / push channel (Twilio)
    MobileService,
    "mobile"
);
placeholder_channel!(
    /// Slack channel
    SlackService,
    "slack"
);
placeholder_channel!(
    /// Microsoft Teams channel
    TeamsService,
    "teams"
);
placeholder_channel!(
    /// Zoom chat channel
    ZoomService,
    "zoom"
);
placeholder_channel!(
    /// WhatsApp channel
    WhatsAppService,
    "whatsapp"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationType;

    async fn assert_noop(service: &dyn NotificationService, expected_name: &str) {
        assert_eq!(service.name(), expected_name);
        assert!(service.credentials().is_empty());
        assert!(service.supports(NotificationType::Text));
        assert!(service.validate_credentials().is_ok());

        let audio = Notification::new("audio", "ring").unwrap();
        assert!(service.notify(&[String::new()], &Notification::text("hi")).await.is_ok());
        assert!(service.notify(&[], &audio).await.is_ok());
        assert!(
            service
                .notify(&["not an address".to_string()], &audio)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_placeholders_construct_with_empty_credentials() {
        let empty = Credentials::new();
        assert_noop(&MobileService::new(&empty).unwrap(), "mobile").await;
        assert_noop(&SlackService::new(&empty).unwrap(), "slack").await;
        assert_noop(&TeamsService::new(&empty).unwrap(), "teams").await;
        assert_noop(&ZoomService::new(&empty).unwrap(), "zoom").await;
        assert_noop(&WhatsAppService::new(&empty).unwrap(), "whatsapp").await;
    }

    #[test]
    fn test_placeholders_keep_given_credentials() {
        let credentials = Credentials::new().with("webhook", "https://hooks.slack.com/x");
        let slack = SlackService::new(&credentials).unwrap();
        assert_eq!(
            slack.credentials().get("webhook"),
            Some(Some("https://hooks.slack.com/x"))
        );
    }
}
