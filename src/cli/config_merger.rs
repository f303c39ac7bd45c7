//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override file and environment values.

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the command needs
    ///
    /// `--config` selects a single file and `--env` overrides
    /// `NOTIFY_APP_ENV`. Commands that never read channel settings start
    /// from defaults, so they work without a config directory.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if !cli.command.requires_config() && cli.config.is_none() {
            return Ok(Self::new(Settings::default()));
        }

        let mut loader = ConfigLoader::with_file_override(cli.config.clone())?;
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Apply CLI overrides to the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.log_level {
            config.logger.level = level.as_str().to_string();
        } else if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ENV_LOCK;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_log_level_overrides() {
        assert_eq!(merge(&["notify-hub", "channels"]).logger.level, "info");
        assert_eq!(merge(&["notify-hub", "-v", "channels"]).logger.level, "debug");
        assert_eq!(merge(&["notify-hub", "-q", "channels"]).logger.level, "error");
        assert_eq!(
            merge(&["notify-hub", "-v", "--log-level", "trace", "channels"])
                .logger
                .level,
            "trace"
        );
    }

    #[test]
    fn test_commands_without_config_use_defaults() {
        let cli = Cli::try_parse_from(["notify-hub", "multiply", "2", "3"]).unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap(), Settings::default());
    }

    #[test]
    fn test_config_file_is_loaded() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[channels.email.credentials]\nemail = \"a@example.com\"\nssh_key = \"k\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["notify-hub", "--config", path, "check"]).unwrap();
        let settings = ConfigurationMerger::from_cli(&cli)
            .unwrap()
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(
            settings.channels["email"].credentials.get("email"),
            Some(Some("a@example.com"))
        );
    }

    #[test]
    fn test_config_flag_wins_over_conflicting_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nname = \"flag-hub\"").unwrap();
        let path = file.path().to_str().unwrap();

        let saved: Vec<_> = ["NOTIFY_CONFIG_DIR", "NOTIFY_CONFIG_FILE"]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();
        unsafe {
            std::env::set_var("NOTIFY_CONFIG_DIR", "/nonexistent/config");
            std::env::set_var("NOTIFY_CONFIG_FILE", "/nonexistent/hub.toml");
        }

        let cli = Cli::try_parse_from(["notify-hub", "--config", path, "check"]).unwrap();
        let result = ConfigurationMerger::from_cli(&cli);

        unsafe {
            for (key, value) in saved {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        let settings = result.unwrap().merge_cli_args(&cli).unwrap();
        assert_eq!(settings.application.name, "flag-hub");
    }
}
