//! Closed registry of notification kinds.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Kind of payload a notification carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Text,
    Audio,
}

impl NotificationType {
    /// Every valid notification type, in registry order
    pub const ALL: [NotificationType; 2] = [NotificationType::Text, NotificationType::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Text => "text",
            NotificationType::Audio => "audio",
        }
    }

    /// Membership test against the registry
    pub fn is_valid(tag: &str) -> bool {
        Self::lookup(tag).is_some()
    }

    /// Comma separated list of valid tags for error messages
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(NotificationType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validates a declared set of supported tags for a service.
    ///
    /// Every tag must be a registry member; otherwise the error names all
    /// offending tags.
    pub fn parse_supported<S: AsRef<str>>(
        service: &str,
        tags: &[S],
    ) -> AppResult<BTreeSet<NotificationType>> {
        let mut supported = BTreeSet::new();
        let mut invalid = Vec::new();

        for tag in tags {
            match Self::lookup(tag.as_ref()) {
                Some(kind) => {
                    supported.insert(kind);
                }
                None => invalid.push(tag.as_ref().to_string()),
            }
        }

        if !invalid.is_empty() {
            return Err(AppError::InvalidSupportedTypes {
                service: service.to_string(),
                invalid: invalid.join(", "),
                valid: Self::valid_values(),
            });
        }

        Ok(supported)
    }

    // Tags are exact lowercase matches.
    fn lookup(tag: &str) -> Option<NotificationType> {
        match tag {
            "text" => Some(NotificationType::Text),
            "audio" => Some(NotificationType::Audio),
            _ => None,
        }
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| AppError::UnsupportedNotificationType {
            value: s.to_string(),
            valid: Self::valid_values(),
        })
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
