//! Channels command handler

use crate::config::Settings;
use crate::services::notifications::ChannelRegistry;

/// Lists registered channels with their supported types and configuration state
pub struct ChannelsCommandHandler {
    registry: ChannelRegistry,
    config: Settings,
}

impl ChannelsCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self {
            registry: ChannelRegistry::builtin(),
            config,
        }
    }

    /// One line per registered channel, in name order
    pub fn lines(&self) -> Vec<String> {
        self.registry
            .names()
            .into_iter()
            .map(|name| {
                let types = self
                    .registry
                    .supported_types(name)
                    .unwrap_or_default()
                    .join(", ");
                let state = match self.config.channels.get(name) {
                    Some(channel) if channel.enabled => "configured",
                    Some(_) => "disabled",
                    None => "not configured",
                };
                format!("{:<10} {:<12} {}", name, types, state)
            })
            .collect()
    }

    pub fn execute(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelSettings;

    #[test]
    fn test_lists_every_builtin_channel() {
        let handler = ChannelsCommandHandler::new(Settings::default());
        let lines = handler.lines();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("email"));
        assert!(lines.iter().all(|line| line.contains("text")));
        assert!(lines.iter().all(|line| line.ends_with("not configured")));
    }

    #[test]
    fn test_reports_configuration_state() {
        let mut settings = Settings::default();
        settings
            .channels
            .insert("email".to_string(), ChannelSettings::default());
        settings.channels.insert(
            "slack".to_string(),
            ChannelSettings {
                enabled: false,
                ..Default::default()
            },
        );

        let lines = ChannelsCommandHandler::new(settings).lines();
        let email = lines.iter().find(|l| l.starts_with("email")).unwrap();
        let slack = lines.iter().find(|l| l.starts_with("slack")).unwrap();
        assert!(email.ends_with("configured"));
        assert!(!email.ends_with("not configured"));
        assert!(slack.ends_with("disabled"));
    }
}
