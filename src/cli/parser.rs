//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Send notifications through email, chat and mobile channels
#[derive(Parser, Debug)]
#[command(name = "notify-hub")]
#[command(about = "Send notifications through email, chat and mobile channels")]
#[command(long_about = "
notify-hub sends text notifications through a set of configured channels.
Channel credentials come from the [channels.<name>.credentials] tables of the
configuration files or from NOTIFY_CHANNELS__<NAME>__CREDENTIALS__<KEY>
environment variables.

EXAMPLES:
    # List the channels this build knows about
    notify-hub channels

    # Check that every enabled channel has usable credentials
    notify-hub check

    # Send an email, printing what would be sent instead of sending it
    notify-hub send --channel email --to ops@example.com --content 'disk full' --dry-run

    # Use a single configuration file in production mode
    notify-hub --config /etc/notify-hub/hub.toml --env prod check --channel email
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered config/ directory.
    /// The file must exist and be readable.
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which {environment}.toml overlay is loaded.
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override, wins over --verbose and --quiet
    #[arg(long, global = true, value_enum, env = "NOTIFY_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered channels and the notification types they support
    Channels,

    /// Construct configured channels and report whether their credentials are valid
    ///
    /// Exits non-zero when any checked channel fails.
    ///
    /// Examples:
    ///   notify-hub check                  # every enabled channel
    ///   notify-hub check --channel email  # only the email channel
    Check {
        /// Only check this channel
        #[arg(long, value_name = "NAME", value_parser = super::validation::validate_channel_name)]
        channel: Option<String>,
    },

    /// Send one notification through a channel
    Send {
        /// Channel to send through
        #[arg(long, value_name = "NAME", value_parser = super::validation::validate_channel_name)]
        channel: String,

        /// Notification type: text or audio
        #[arg(long = "type", value_name = "TYPE", default_value = "text")]
        kind: String,

        /// Notification content
        #[arg(long, value_name = "TEXT")]
        content: String,

        /// Recipients, in delivery order
        #[arg(long = "to", value_name = "RECIPIENT", required = true, num_args = 1.., value_parser = super::validation::validate_recipient)]
        recipients: Vec<String>,

        /// Print the messages instead of delivering them
        #[arg(long)]
        dry_run: bool,
    },

    /// Multiply two integers given as JSON values
    ///
    /// Examples:
    ///   notify-hub multiply 6 7
    ///   notify-hub multiply -- -4 -5
    Multiply {
        #[arg(allow_negative_numbers = true, value_parser = super::validation::parse_json_operand)]
        a: JsonValue,

        #[arg(allow_negative_numbers = true, value_parser = super::validation::parse_json_operand)]
        b: JsonValue,
    },
}

impl Commands {
    /// Whether the command reads channel settings from configuration
    pub fn requires_config(&self) -> bool {
        matches!(self, Commands::Check { .. } | Commands::Send { .. })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
