//! Core notification service trait and the shared construction sequence.
//!
//! Every channel owns a [`ServiceDescriptor`] built through
//! [`ServiceDescriptor::build`], so credential validation and supported-type
//! checks happen the same way for all channels and before any instance exists.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::debug;

use super::credentials::Credentials;
use crate::error::AppResult;
use crate::models::{Notification, NotificationType};

/// Validated identity of a notification service
///
/// Holds its own copies of the credentials and supported types; nothing the
/// caller does to its originals afterwards is visible here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    name: String,
    credentials: Credentials,
    supported_types: BTreeSet<NotificationType>,
}

impl ServiceDescriptor {
    /// Runs the construction sequence shared by all channels
    ///
    /// 1. copies `credentials`
    /// 2. runs `validate` against the copy
    /// 3. checks every entry of `supported` against the type registry
    /// 4. stores the validated supported types
    ///
    /// # Errors
    /// Whatever `validate` returns, or `InvalidSupportedTypes` when a declared
    /// type is not registered
    pub fn build<S, F>(
        name: &str,
        credentials: &Credentials,
        supported: &[S],
        validate: F,
    ) -> AppResult<Self>
    where
        S: AsRef<str>,
        F: FnOnce(&str, &Credentials) -> AppResult<()>,
    {
        let credentials = credentials.clone();
        validate(name, &credentials)?;
        let supported_types = NotificationType::parse_supported(name, supported)?;

        debug!(
            service = name,
            credential_keys = credentials.len(),
            supported = ?supported_types,
            "Notification service ready"
        );

        Ok(Self {
            name: name.to_string(),
            credentials,
            supported_types,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn supported_types(&self) -> &BTreeSet<NotificationType> {
        &self.supported_types
    }
}

/// Trait for notification channels (email, SMS, chat, etc.)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Instances only exist after a successful [`ServiceDescriptor::build`], so
/// `notify` can rely on validated credentials.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Returns the validated identity of this service
    fn descriptor(&self) -> &ServiceDescriptor;

    /// Service name, the lower-cased channel name
    fn name(&self) -> &str {
        self.descriptor().name()
    }

    fn credentials(&self) -> &Credentials {
        self.descriptor().credentials()
    }

    fn supported_notification_types(&self) -> &BTreeSet<NotificationType> {
        self.descriptor().supported_types()
    }

    fn supports(&self, kind: NotificationType) -> bool {
        self.supported_notification_types().contains(&kind)
    }

    /// Re-checks the stored credentials
    ///
    /// # Returns
    /// Ok(()) if the credentials are usable, a credential or syntax error otherwise
    fn validate_credentials(&self) -> AppResult<()>;

    /// Delivers `notification` to every recipient
    ///
    /// # Arguments
    /// * `recipients` - Channel-specific destination identifiers
    /// * `notification` - The notification to send
    async fn notify(&self, recipients: &[String], notification: &Notification) -> AppResult<()>;
}
