// Incoming guild messages: ask the core router what to do, then do it.

use crate::core::routing::{route_message, IncomingMessage, MessageOutcome};
use crate::discord::leveling_announcements::send_level_up_embed;
use crate::discord::moderation::spam_handler::{apply_timeout, sent_at};
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    // Ignore bot messages (including our own)
    if msg.author.bot {
        return Ok(());
    }

    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let incoming = IncomingMessage {
        guild_id: guild_id.get(),
        user_id: msg.author.id.get(),
        content: &msg.content,
        sent_at: sent_at(msg),
    };
    let outcome = route_message(&*data.anti_spam, &*data.replies, &*data.leveling, incoming)
        .await
        .map_err(|e| Error::from(e.to_string()))?;

    match outcome {
        MessageOutcome::Flooded { duration, reason } => {
            apply_timeout(ctx, msg, guild_id, duration, &reason).await;
        }
        MessageOutcome::Answered(answer) => {
            if let Err(e) = msg.channel_id.say(&ctx.http, &answer).await {
                tracing::warn!("Failed to send Q&A answer: {}", e);
            }
        }
        MessageOutcome::Replied { keywords, level_up } => {
            for reply in keywords {
                if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
                    tracing::warn!("Failed to send keyword reply: {}", e);
                }
            }
            if let Some(level_up) = level_up {
                if let Err(e) = send_level_up_embed(ctx, msg, &level_up).await {
                    tracing::warn!("Failed to announce level up: {}", e);
                }
            }
        }
    }

    Ok(())
}
