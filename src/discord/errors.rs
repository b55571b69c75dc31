// Maps serenity failures onto the command error taxonomy and renders the
// notices users see when a command or handler fails.

use crate::core::errors::CommandError;
use crate::discord::{Context, Error};
use ::serenity::http::HttpError;
use poise::serenity_prelude as serenity;

/// Discord JSON error code for "Cannot send messages to this user".
const CANNOT_MESSAGE_USER: isize = 50007;

/// Classify a failed Discord API call.
pub fn classify(err: &serenity::Error) -> CommandError {
    if let serenity::Error::Http(http) = err {
        let http: &HttpError = http;
        if let HttpError::UnsuccessfulRequest(response) = http {
            if response.error.code == CANNOT_MESSAGE_USER {
                return CommandError::RecipientUnreachable;
            }
            match response.status_code.as_u16() {
                403 => return CommandError::PermissionDenied,
                404 => return CommandError::not_found("that user or channel"),
                _ => {}
            }
        }
    }
    CommandError::RemoteService(err.to_string())
}

/// Classify a failed direct message. A 403 on a DM means the recipient has
/// closed their DMs, not that the bot is missing a permission.
pub fn classify_dm(err: &serenity::Error) -> CommandError {
    match classify(err) {
        CommandError::PermissionDenied => CommandError::RecipientUnreachable,
        other => other,
    }
}

/// The user-facing text for an error.
pub fn notice(err: &CommandError) -> String {
    match err {
        CommandError::PermissionDenied => "❌ I don't have permission to do that.".to_string(),
        CommandError::RecipientUnreachable => {
            "⚠️ I can't DM that user. They may have direct messages turned off.".to_string()
        }
        CommandError::NotFound(what) => format!("⚠️ Could not find {}.", what),
        CommandError::RemoteService(msg) => format!("❌ Error: {}", msg),
        CommandError::Validation(msg) => format!("⚠️ {}", msg),
    }
}

/// Reply to the invoking user with the notice for `err`, visible only to them.
pub async fn reply_error(ctx: Context<'_>, err: impl Into<CommandError>) -> Result<(), Error> {
    let err = err.into();
    tracing::debug!(command = %ctx.command().qualified_name, error = %err, "Command failed");

    ctx.send(
        poise::CreateReply::default()
            .content(notice(&err))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_http_errors_are_remote_failures() {
        let err = serenity::Error::Other("gateway closed");
        assert_eq!(
            classify(&err),
            CommandError::RemoteService("gateway closed".to_string())
        );
        assert_eq!(
            classify_dm(&err),
            CommandError::RemoteService("gateway closed".to_string())
        );
    }

    #[test]
    fn notices_carry_the_detail() {
        assert_eq!(
            notice(&CommandError::validation("Times must be between 1 and 5")),
            "⚠️ Times must be between 1 and 5"
        );
        assert!(notice(&CommandError::RemoteService("timeout".into())).contains("timeout"));
        assert!(notice(&CommandError::not_found("user 42")).contains("user 42"));
    }
}
