//! Per-channel credential mapping.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Opaque key/value credentials for a notification channel
///
/// A key can be absent, present with a null value, or present with a value;
/// channels treat the first two differently in their error messages. Values
/// are never printed by the `Debug` implementation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, Option<String>>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    /// Builder-style insert of a null value
    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// `None` when the key is absent, `Some(None)` when it is null
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of a required field
    ///
    /// # Errors
    /// `Credential` error when the key is absent or its value is null
    pub fn require(&self, service: &str, key: &str) -> AppResult<&str> {
        match self.get(key) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(AppError::credential(service, key, "cannot be null")),
            None => Err(AppError::credential(service, key, "is missing")),
        }
    }

    /// Like [`Credentials::require`], accepting the first present key among
    /// `keys`. Errors name the first key.
    pub fn require_any<'a>(&'a self, service: &str, keys: &[&str]) -> AppResult<&'a str> {
        match keys.iter().find(|key| self.contains_key(key)) {
            Some(key) => self.require(service, key),
            None => Err(AppError::credential(
                service,
                keys.first().copied().unwrap_or_default(),
                "is missing",
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.0
                    .iter()
                    .map(|(key, value)| (key, value.as_ref().map(|_| "***"))),
            )
            .finish()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Credentials
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.map(Into::into)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_absent_null_and_present() {
        let credentials = Credentials::new().with("email", "bob@gmail.com").with_null("ssh_key");

        assert_eq!(credentials.get("email"), Some(Some("bob@gmail.com")));
        assert_eq!(credentials.get("ssh_key"), Some(None));
        assert_eq!(credentials.get("token"), None);
        assert_eq!(credentials.len(), 2);
    }

    #[test]
    fn test_require_reports_missing_and_null() {
        let credentials = Credentials::new().with_null("ssh_key");

        let err = credentials.require("email", "email").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Credential);
        assert!(err.to_string().contains("email is missing"));

        let err = credentials.require("email", "ssh_key").unwrap_err();
        assert!(err.to_string().contains("ssh_key cannot be null"));
    }

    #[test]
    fn test_require_any_prefers_first_present_key() {
        let credentials = Credentials::new().with("api_key", "k2");
        assert_eq!(
            credentials.require_any("email", &["ssh_key", "api_key"]).unwrap(),
            "k2"
        );

        let err = Credentials::new()
            .require_any("email", &["ssh_key", "api_key"])
            .unwrap_err();
        assert!(err.to_string().contains("ssh_key is missing"));
    }

    #[test]
    fn test_debug_redacts_values() {
        let credentials = Credentials::new().with("ssh_key", "super-secret").with_null("email");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("ssh_key"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_deserializes_null_values() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"email": null, "ssh_key": "k"}"#).unwrap();
        assert_eq!(credentials.get("email"), Some(None));
        assert_eq!(credentials.get("ssh_key"), Some(Some("k")));
    }

    #[test]
    fn test_from_iterator() {
        let credentials: Credentials = [("email", Some("a@b.com")), ("ssh_key", None)]
            .into_iter()
            .collect();
        assert_eq!(credentials.get("ssh_key"), Some(None));
    }
}
