//! Configuration loader for notify-hub
//!
//! `ConfigLoader` collects settings from files and environment variables with
//! a fixed precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use tracing::debug;

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "NOTIFY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `NOTIFY_*` environment variables
///
/// With a single configuration file, steps 1-3 are replaced by that file.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `NOTIFY_CONFIG_DIR`, `NOTIFY_CONFIG_FILE` and
    /// `NOTIFY_APP_ENV`, preferring an explicitly given configuration file
    ///
    /// With `Some(path)` the file is loaded instead of the layered directory
    /// and the two environment variables are not checked against each other.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is given and both `NOTIFY_CONFIG_DIR` and
    /// `NOTIFY_CONFIG_FILE` are set.
    pub fn with_file_override(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let env_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_none() && env_dir.is_some() && env_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set. Use {} for layered configuration or \
                 {} for a single configuration file.",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: env_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file: config_file.or(env_file),
            environment: AppEnvironment::from_env(),
        })
    }

    /// Override the environment read from `NOTIFY_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the single configuration file) is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        debug!(
            environment = %self.environment,
            channels = settings.channels.len(),
            "Configuration loaded"
        );

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // NOTIFY_MAIL__TIMEOUT_SECONDS -> mail.timeout_seconds
        Self::add_env_source(builder)
            .build()
            .map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!(
                "Configuration path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    /// `NOTIFY_` variables map onto configuration keys, with `__` between
    /// nested keys:
    /// - `NOTIFY_LOGGER__LEVEL` -> `logger.level`
    /// - `NOTIFY_CHANNELS__EMAIL__CREDENTIALS__SSH_KEY` -> `channels.email.credentials.ssh_key`
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

/// Serializes tests that read or write process environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BASE_CONFIG: &str = r#"
[application]
name = "test-hub"
version = "1.0.0"

[logger]
level = "info"

[logger.console]
enabled = true
colored = false

[mail]
api_url = "https://api.sendgrid.com/v3"
timeout_seconds = 30

[channels.email]
enabled = true

[channels.email.credentials]
email = "alerts@example.com"
ssh_key = "SG.default"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables for one test and restores them on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate for every variable the loader reads
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "NOTIFY_LOGGER__LEVEL",
                "NOTIFY_MAIL__TIMEOUT_SECONDS",
                "NOTIFY_CHANNELS__EMAIL__CREDENTIALS__SSH_KEY",
            ] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn loader_for(dir: &TempDir, env: &mut EnvGuard) -> ConfigLoader {
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        ConfigLoader::with_file_override(None).expect("Should create loader")
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::with_file_override(None).expect("Should create loader");
        assert_eq!(loader.config_dir, Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment, AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::with_file_override(None) {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("NOTIFY_CONFIG_DIR"));
                assert!(msg.contains("NOTIFY_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_config_loader_environment_from_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        env.set(AppEnvironment::ENV_VAR, "prod");

        let loader = ConfigLoader::with_file_override(None).expect("Should create loader");
        assert_eq!(loader.environment, AppEnvironment::Production);

        let loader = loader.with_environment(AppEnvironment::Test);
        assert_eq!(loader.environment, AppEnvironment::Test);
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);

        match loader_for(&temp_dir, &mut env).load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        let settings = loader_for(&temp_dir, &mut env)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.application.name, "test-hub");
        assert!(!settings.logger.console.colored);
        let email = &settings.channels["email"];
        assert_eq!(
            email.credentials.get("email"),
            Some(Some("alerts@example.com"))
        );
        assert_eq!(email.credentials.get("ssh_key"), Some(Some("SG.default")));
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();

        let staging_config = r#"
[application]
name = "staging-hub"

[mail]
timeout_seconds = 10

[channels.slack]
enabled = false
"#;
        let local_config = r#"
[mail]
timeout_seconds = 5
"#;
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("staging.toml", staging_config),
            ("local.toml", local_config),
        ]);
        env.set(AppEnvironment::ENV_VAR, "staging");
        env.set("NOTIFY_LOGGER__LEVEL", "debug");
        env.set("NOTIFY_CHANNELS__EMAIL__CREDENTIALS__SSH_KEY", "SG.from-env");

        let settings = loader_for(&temp_dir, &mut env)
            .load()
            .expect("Should load settings");

        // environment variables win over every file
        assert_eq!(settings.logger.level, "debug");
        assert_eq!(
            settings.channels["email"].credentials.get("ssh_key"),
            Some(Some("SG.from-env"))
        );
        // local.toml wins over staging.toml
        assert_eq!(settings.mail.timeout_seconds, 5);
        // staging.toml wins over default.toml
        assert_eq!(settings.application.name, "staging-hub");
        assert!(!settings.channels["slack"].enabled);
        // default.toml fills the rest
        assert_eq!(settings.application.version, "1.0.0");
        assert_eq!(
            settings.channels["email"].credentials.get("email"),
            Some(Some("alerts@example.com"))
        );
    }

    #[test]
    fn test_optional_files_not_required() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = loader_for(&temp_dir, &mut env)
            .load()
            .expect("Should load settings");
        assert_eq!(settings.application.name, "test-hub");
    }

    #[test]
    fn test_load_single_file_mode() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "single.toml",
            "[application]\nname = \"single-hub\"\n\n[mail]\ntimeout_seconds = 60\n",
        )]);
        env.set(
            CONFIG_FILE_ENV,
            temp_dir.path().join("single.toml").to_str().unwrap(),
        );

        let settings = ConfigLoader::with_file_override(None)
            .expect("Should create loader")
            .load()
            .expect("Should load settings");
        assert_eq!(settings.application.name, "single-hub");
        assert_eq!(settings.mail.timeout_seconds, 60);
        assert!(settings.channels.is_empty());
    }

    #[test]
    fn test_file_override_wins_over_directory() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("other.toml", "[application]\nname = \"other-hub\"\n"),
        ]);

        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::with_file_override(Some(temp_dir.path().join("other.toml")))
            .expect("Should create loader")
            .load()
            .expect("Should load settings");
        assert_eq!(settings.application.name, "other-hub");
    }

    #[test]
    fn test_explicit_file_skips_env_exclusivity_check() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("explicit.toml", "[application]\nname = \"explicit-hub\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(CONFIG_FILE_ENV, "/path/to/ignored.toml");

        assert!(ConfigLoader::with_file_override(None).is_err());

        let loader =
            ConfigLoader::with_file_override(Some(temp_dir.path().join("explicit.toml")))
                .expect("Explicit file should win over conflicting variables");
        assert_eq!(
            loader.config_file.as_deref(),
            Some(temp_dir.path().join("explicit.toml").as_path())
        );
        let settings = loader.load().expect("Should load settings");
        assert_eq!(settings.application.name, "explicit-hub");
    }

    #[test]
    fn test_load_rejects_unknown_channel() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let config = format!("{}\n[channels.pager]\nenabled = true\n", BASE_CONFIG);
        let temp_dir = setup_config_dir(&[("default.toml", config.as_str())]);

        let err = loader_for(&temp_dir, &mut env).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_env_var_rejected_by_validation() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set("NOTIFY_MAIL__TIMEOUT_SECONDS", "0");

        let err = loader_for(&temp_dir, &mut env).load().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "mail.timeout_seconds")
        );
    }
}
