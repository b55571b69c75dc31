// Discord-specific spam handling - turns a flood outcome into a member timeout.

use crate::core::errors::CommandError;
use crate::discord::errors::classify;
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::time::Duration;

/// The message's own creation time; the flood window is measured against it.
pub fn sent_at(msg: &serenity::Message) -> DateTime<Utc> {
    DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0).unwrap_or_else(Utc::now)
}

/// Time the author out and post a notice in the channel. Failures are reported
/// in the channel and logged, never returned.
pub async fn apply_timeout(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    guild_id: serenity::GuildId,
    duration: Duration,
    reason: &str,
) {
    let timeout_until = match serenity::Timestamp::from_unix_timestamp(
        Utc::now().timestamp() + duration.as_secs() as i64,
    ) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::error!("Failed to create timeout timestamp: {}", e);
            return;
        }
    };

    let result = guild_id
        .edit_member(
            &ctx.http,
            msg.author.id,
            serenity::EditMember::new()
                .disable_communication_until_datetime(timeout_until)
                .audit_log_reason(reason),
        )
        .await;

    let notice = match result {
        Ok(_) => {
            tracing::info!(
                guild_id = guild_id.get(),
                user_id = msg.author.id.get(),
                secs = duration.as_secs(),
                "Timed out member for flooding"
            );
            format!(
                "⚠️ {} has been timed out for {} seconds for flooding the chat.",
                msg.author.mention(),
                duration.as_secs()
            )
        }
        Err(e) => match classify(&e) {
            CommandError::PermissionDenied => {
                tracing::warn!(
                    guild_id = guild_id.get(),
                    "Missing permission to time out {}",
                    msg.author.id
                );
                "❌ I don't have permission to time out this member.".to_string()
            }
            other => {
                tracing::error!("Failed to timeout user: {}", e);
                format!("❌ Failed to time out {}: {}", msg.author.mention(), other)
            }
        },
    };

    if let Err(e) = msg.channel_id.say(&ctx.http, &notice).await {
        tracing::warn!("Failed to send timeout notification: {}", e);
    }
}
