use std::collections::BTreeMap;
use std::sync::Arc;

use super::credentials::Credentials;
use super::email_service::EmailService;
use super::placeholder::{MobileService, SlackService, TeamsService, WhatsAppService, ZoomService};
use super::provider::NotificationService;
use crate::error::{AppError, AppResult};
use crate::external::mail::EmailSender;

/// Shared collaborators handed to every channel factory
#[derive(Clone)]
pub struct ChannelContext {
    pub mailer: Arc<dyn EmailSender>,
}

impl ChannelContext {
    pub fn new(mailer: Arc<dyn EmailSender>) -> Self {
        Self { mailer }
    }
}

type ChannelFactory = Box<
    dyn Fn(&Credentials, &ChannelContext) -> AppResult<Box<dyn NotificationService>> + Send + Sync,
>;

struct ChannelEntry {
    supported_types: &'static [&'static str],
    factory: ChannelFactory,
}

/// Registry for mapping channel names to channel constructors
pub struct ChannelRegistry {
    entries: BTreeMap<&'static str, ChannelEntry>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry with every built-in channel
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(EmailService::NAME, EmailService::SUPPORTED_TYPES, |credentials, ctx| {
                let service = EmailService::new(credentials, ctx.mailer.clone())?;
                Ok(Box::new(service) as Box<dyn NotificationService>)
            })
            .register(MobileService::NAME, MobileService::SUPPORTED_TYPES, |credentials, _| {
                Ok(Box::new(MobileService::new(credentials)?) as Box<dyn NotificationService>)
            })
            .register(SlackService::NAME, SlackService::SUPPORTED_TYPES, |credentials, _| {
                Ok(Box::new(SlackService::new(credentials)?) as Box<dyn NotificationService>)
            })
            .register(TeamsService::NAME, TeamsService::SUPPORTED_TYPES, |credentials, _| {
                Ok(Box::new(TeamsService::new(credentials)?) as Box<dyn NotificationService>)
            })
            .register(ZoomService::NAME, ZoomService::SUPPORTED_TYPES, |credentials, _| {
                Ok(Box::new(ZoomService::new(credentials)?) as Box<dyn NotificationService>)
            })
            .register(WhatsAppService::NAME, WhatsAppService::SUPPORTED_TYPES, |credentials, _| {
                Ok(Box::new(WhatsAppService::new(credentials)?) as Box<dyn NotificationService>)
            });
        registry
    }

    /// Register a channel constructor under `name`
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F>(
        &mut self,
        name: &'static str,
        supported_types: &'static [&'static str],
        factory: F,
    ) -> &mut Self
    where
        F: Fn(&Credentials, &ChannelContext) -> AppResult<Box<dyn NotificationService>>
            + Send
            + Sync
            + 'static,
    {
        self.entries.insert(
            name,
            ChannelEntry {
                supported_types,
                factory: Box::new(factory),
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered channel names in alphabetical order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Declared notification types of a registered channel
    pub fn supported_types(&self, name: &str) -> Option<&'static [&'static str]> {
        self.entries.get(name).map(|entry| entry.supported_types)
    }

    /// Construct a channel by name
    ///
    /// # Errors
    /// `UnknownChannel` when nothing is registered under `name`, otherwise
    /// whatever the channel constructor returns
    pub fn create(
        &self,
        name: &str,
        credentials: &Credentials,
        ctx: &ChannelContext,
    ) -> AppResult<Box<dyn NotificationService>> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| AppError::UnknownChannel {
                name: name.to_string(),
                registered: self.names().join(", "),
            })?;

        (entry.factory)(credentials, ctx)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
