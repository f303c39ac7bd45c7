//! CLI argument validation functions
//!
//! Value parsers for arguments clap cannot check on its own.

use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;

use crate::services::notifications::ChannelRegistry;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate that a channel name is registered, ignoring case
pub fn validate_channel_name(name: &str) -> Result<String, String> {
    let name = name.trim().to_lowercase();
    let registry = ChannelRegistry::builtin();

    if registry.contains(&name) {
        Ok(name)
    } else {
        Err(format!(
            "Unknown channel '{}'. Registered channels are: {}",
            name,
            registry.names().join(", ")
        ))
    }
}

/// Validate that a recipient is non-empty; format checks belong to the channel
pub fn validate_recipient(recipient: &str) -> Result<String, String> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err("Recipient cannot be empty".to_string());
    }
    Ok(recipient.to_string())
}

/// Parse an operand as JSON, falling back to a JSON string
///
/// `7` becomes a number, `null` stays null, and `abc` becomes `"abc"` so the
/// multiplication reports a type error instead of a parse error.
pub fn parse_json_operand(raw: &str) -> Result<JsonValue, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string())))
}
