//! notify-hub library
//!
//! Unified notification channels (email, mobile, Slack, Teams, Zoom,
//! WhatsApp) behind one trait, plus the configuration, logging and CLI
//! plumbing around them.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::{Notification, NotificationType};
pub use services::notifications::{Credentials, NotificationHub, NotificationService};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
