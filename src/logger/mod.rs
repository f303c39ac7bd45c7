//! Logger module
//!
//! Built on `tracing-subscriber` with:
//! - Console output on stderr with color control
//! - File output in one of three formats (Full, Compact, JSON)
//! - Fallback to stderr when the log file stops accepting writes

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

/// Initialize the global subscriber with the given configuration
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match (config.console.enabled, config.file.enabled) {
        (true, true) => init_both(&config, filter)?,
        (true, false) => init_console_only(&config.console, filter)?,
        (false, true) => init_file_only(&config.file, filter)?,
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    }

    Ok(())
}

fn use_ansi(config: &ConsoleConfig) -> bool {
    config.colored && std::io::stderr().is_terminal()
}

fn init_console_only(config: &ConsoleConfig, filter: EnvFilter) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(use_ansi(config))
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn init_file_only(config: &FileConfig, filter: EnvFilter) -> anyhow::Result<()> {
    let writer = LogFileWriter::new(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json().with_writer(writer))
            .try_init()?,
    }

    Ok(())
}

fn init_both(config: &LoggerConfig, filter: EnvFilter) -> anyhow::Result<()> {
    both_subscriber(config, filter)?.try_init()?;
    Ok(())
}

/// Registry with the file layer and the console layer
///
/// The file layer goes first, otherwise ANSI escapes from the console
/// layer leak into formatted span fields in the file.
/// See: https://github.com/tokio-rs/tracing/issues/1817
fn both_subscriber(
    config: &LoggerConfig,
    filter: EnvFilter,
) -> anyhow::Result<Box<dyn Subscriber + Send + Sync>> {
    let ansi = use_ansi(&config.console);
    let writer = LogFileWriter::new(&config.file)?;
    let registry = tracing_subscriber::registry().with(filter);

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.file.format {
        LogFormat::Full => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(ansi)
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);
            Box::new(registry.with(file_layer).with(console_layer))
        }
        LogFormat::Compact => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(ansi)
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);
            Box::new(registry.with(file_layer).with(console_layer))
        }
        LogFormat::Json => {
            let file_layer = fmt::layer().with_ansi(false).json().with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(ansi)
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr);
            Box::new(registry.with(file_layer).with(console_layer))
        }
    };

    Ok(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_invalid_config() {
        let config = LoggerConfig::default().with_level("chatty");
        assert!(init_logger(config).is_err());

        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            ..Default::default()
        };
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_file_and_console_subscriber_writes_every_format() {
        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("hub.log");
            let config = LoggerConfig {
                console: ConsoleConfig::new(true, false),
                file: FileConfig::new(true, path.clone(), false, format).unwrap(),
                level: "info".to_string(),
            };

            let subscriber = both_subscriber(&config, EnvFilter::new("info")).unwrap();
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(channel = "email", "Notification dispatched");
            });

            let written = std::fs::read_to_string(&path).unwrap();
            assert!(written.contains("Notification dispatched"), "{:?}", format);
            assert!(!written.contains('\u{1b}'), "{:?}", format);
            if format == LogFormat::Json {
                assert!(written.trim_start().starts_with('{'));
            }
        }
    }
}
