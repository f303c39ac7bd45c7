//! Notification payload model.

use serde::Serialize;

use super::NotificationType;
use crate::error::AppResult;

/// Message to be delivered through a notification service
///
/// The type is validated against the registry when the value is built and
/// neither field can be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    kind: NotificationType,
    content: String,
}

impl Notification {
    /// Creates a notification from a type tag and its content
    ///
    /// # Errors
    /// `UnsupportedNotificationType` when `kind` is not a registered tag
    pub fn new(kind: &str, content: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            kind: kind.parse()?,
            content: content.into(),
        })
    }

    /// Creates a text notification
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_type(NotificationType::Text, content)
    }

    pub fn with_type(kind: NotificationType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorKind};
    use proptest::prelude::*;

    #[test]
    fn test_notification_with_unsupported_type() {
        let err = Notification::new("unknown", "content").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        match err {
            AppError::UnsupportedNotificationType { value, valid } => {
                assert_eq!(value, "unknown");
                assert_eq!(valid, "text, audio");
            }
            other => panic!("Expected UnsupportedNotificationType, got {:?}", other),
        }
    }

    #[test]
    fn test_notification_text_shortcut() {
        let notification = Notification::text("This message is like Schrodinger's cat");
        assert_eq!(notification.kind(), NotificationType::Text);
        assert_eq!(
            notification.content(),
            "This message is like Schrodinger's cat"
        );
    }

    #[test]
    fn test_notification_serializes_type_tag() {
        let notification = Notification::new("audio", "beep").unwrap();
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "audio");
        assert_eq!(json["content"], "beep");
    }

    proptest! {
        #[test]
        fn prop_registered_types_round_trip(
            tag in prop::sample::select(vec!["text", "audio"]),
            content in ".*",
        ) {
            let notification = Notification::new(tag, content.clone()).unwrap();
            prop_assert_eq!(notification.kind().as_str(), tag);
            prop_assert_eq!(notification.content(), content.as_str());
        }

        #[test]
        fn prop_unregistered_types_rejected(tag in "[a-zA-Z_]{0,12}", content in ".*") {
            prop_assume!(tag != "text" && tag != "audio");
            let err = Notification::new(&tag, content).unwrap_err();
            prop_assert!(err.is_invalid_argument());
        }
    }
}
