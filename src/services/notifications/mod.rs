//! Notification channels behind one polymorphic interface.
//!
//! Every channel implements [`NotificationService`] and is constructed
//! through [`ServiceDescriptor::build`], which validates credentials and the
//! declared notification types before an instance exists. Channels are looked
//! up by name in a [`ChannelRegistry`]; [`NotificationHub`] binds the registry
//! to the configured `[channels]` section.

mod credentials;
mod email_service;
mod hub;
mod placeholder;
mod provider;
mod registry;

pub use credentials::Credentials;
pub use email_service::{API_KEY_FIELDS, EMAIL_FIELD, EmailService};
pub use hub::{ChannelCheck, NotificationHub};
pub use placeholder::{MobileService, SlackService, TeamsService, WhatsAppService, ZoomService};
pub use provider::{NotificationService, ServiceDescriptor};
pub use registry::{ChannelContext, ChannelRegistry};
