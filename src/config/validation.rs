//! Configuration validation logic

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, MailConfig, Settings};
use crate::services::notifications::ChannelRegistry;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_URL_SCHEMES: &[&str] = &["http://", "https://"];

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        self.file.validate()
    }
}

impl MailConfig {
    /// Validate mail provider settings
    ///
    /// # Validation Rules
    /// - API URL must start with http:// or https://
    /// - Timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_URL_SCHEMES
            .iter()
            .any(|scheme| self.api_url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "mail.api_url",
                format!(
                    "Invalid API URL '{}'. It must start with http:// or https://",
                    self.api_url
                ),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "mail.timeout_seconds",
                "Timeout must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings, returning the first error
    ///
    /// Channel names must match a built-in channel. Credentials themselves
    /// are checked when a channel is opened, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.mail.validate()?;

        let registry = ChannelRegistry::builtin();
        if let Some(unknown) = self.channels.keys().find(|name| !registry.contains(name)) {
            return Err(ConfigError::validation(
                format!("channels.{}", unknown),
                format!(
                    "Unknown channel '{}'. Registered channels are: {}",
                    unknown,
                    registry.names().join(", ")
                ),
            ));
        }

        Ok(())
    }
}
