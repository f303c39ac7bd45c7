//! Check command handler

use crate::error::AppResult;
use crate::services::notifications::{ChannelCheck, NotificationHub};

/// Opens configured channels and reports credential problems
pub struct CheckCommandHandler {
    hub: NotificationHub,
}

impl CheckCommandHandler {
    pub fn new(hub: NotificationHub) -> Self {
        Self { hub }
    }

    /// Runs the checks and prints one line per channel
    ///
    /// # Errors
    /// The error of the first failing channel, after every channel was reported
    pub fn execute(&self, channel: Option<&str>) -> AppResult<()> {
        let checks = self.hub.check_channels(channel);
        if checks.is_empty() {
            println!("No enabled channels are configured");
            return Ok(());
        }

        for check in &checks {
            println!("{}", render(check));
        }

        let failed = checks.iter().filter(|check| !check.is_ok()).count();
        match checks.into_iter().find_map(|check| check.result.err()) {
            Some(first) => {
                println!("{} of the checked channels failed", failed);
                Err(first)
            }
            None => Ok(()),
        }
    }
}

fn render(check: &ChannelCheck) -> String {
    match check.result {
        Ok(()) => format!("✓ {}", check.name),
        Err(ref e) => format!("✗ {}: {}", check.name, e),
    }
}
