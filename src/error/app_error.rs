use crate::config::error::ConfigError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Every failure in channel construction, notification building and delivery is
/// reported through this enum. Errors are never retried or swallowed locally;
/// they surface to the direct caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// Notification type tag outside the notification type registry
    #[error("Unsupported notification type ({value}). The supported notification types are: {valid}")]
    UnsupportedNotificationType { value: String, valid: String },

    /// A service declared supported types that are not in the registry
    #[error(
        "For {service} notification service, supported notification types ({invalid}) contain invalid values. Valid values are: {valid}"
    )]
    InvalidSupportedTypes {
        service: String,
        invalid: String,
        valid: String,
    },

    /// Generic argument error for values outside an allowed set
    #[error("Invalid argument {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Missing or null credential field for a channel
    #[error("Invalid credentials for {service}: {field} {reason}")]
    Credential {
        service: String,
        field: String,
        reason: String,
    },

    /// Malformed email address (sender or recipient)
    #[error("Invalid email address '{address}': {reason}")]
    EmailSyntax { address: String, reason: String },

    /// Failure reported by an outbound delivery provider
    #[error("Provider {provider} failed to deliver to {recipient}")]
    Provider {
        provider: String,
        recipient: String,
        #[source]
        source: anyhow::Error,
    },

    /// Channel name that has no registered factory
    #[error("Unknown notification channel '{name}'. Registered channels are: {registered}")]
    UnknownChannel { name: String, registered: String },

    /// Configuration loading or validation error
    #[error("Configuration error")]
    Configuration {
        #[from]
        source: ConfigError,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// Coarse classification of [`AppError`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Credential,
    Syntax,
    Provider,
    Configuration,
    Internal,
}

impl AppError {
    /// Returns the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::UnsupportedNotificationType { .. }
            | AppError::InvalidSupportedTypes { .. }
            | AppError::InvalidArgument { .. }
            | AppError::UnknownChannel { .. } => ErrorKind::InvalidArgument,
            AppError::Credential { .. } => ErrorKind::Credential,
            AppError::EmailSyntax { .. } => ErrorKind::Syntax,
            AppError::Provider { .. } => ErrorKind::Provider,
            AppError::Configuration { .. } => ErrorKind::Configuration,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// True for argument errors, including credential errors which are a
    /// narrower case of them
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument | ErrorKind::Credential
        )
    }

    /// Builds a credential error for a missing or null field
    pub fn credential(
        service: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AppError::Credential {
            service: service.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Builds a generic invalid-argument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
