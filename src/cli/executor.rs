//! Command executor for dispatching CLI commands

use std::sync::Arc;

use super::handlers::send::SendRequest;
use super::handlers::{
    ChannelsCommandHandler, CheckCommandHandler, MultiplyCommandHandler, SendCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;
use crate::external::mail::{EmailSender, SendGridSender};
use crate::services::notifications::NotificationHub;

/// Execute the parsed command with merged and validated settings
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Commands::Channels => {
            ChannelsCommandHandler::new(settings).execute();
            Ok(())
        }
        Commands::Check { channel } => {
            let mailer: Arc<dyn EmailSender> =
                Arc::new(SendGridSender::new(settings.mail.to_sendgrid_config()));
            CheckCommandHandler::new(NotificationHub::from_settings(&settings, mailer))
                .execute(channel.as_deref())
        }
        Commands::Send {
            channel,
            kind,
            content,
            recipients,
            dry_run,
        } => {
            let request = SendRequest {
                channel: channel.clone(),
                kind: kind.clone(),
                content: content.clone(),
                recipients: recipients.clone(),
            };
            SendCommandHandler::new(settings)
                .execute(&request, *dry_run)
                .await
        }
        Commands::Multiply { a, b } => MultiplyCommandHandler::execute(a, b).map(|_| ()),
    }
}
