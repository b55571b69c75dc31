// Gateway events the bot reacts to, outside of slash commands.

pub mod member_join;
pub mod message;

use crate::discord::commands::presence;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

/// Event handler for non-command Discord events.
///
/// Handler failures are logged here and never bubble up to poise, so one bad
/// event cannot stop the rest from being processed.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!(
                "Logged in as {} ({} guilds)",
                data_about_bot.user.name,
                data_about_bot.guilds.len()
            );
            presence::on_ready(ctx);
        }
        serenity::FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, new_message, data).await {
                tracing::error!(
                    message_id = new_message.id.get(),
                    "Error handling message: {}",
                    e
                );
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = member_join::handle_member_join(ctx, new_member, data).await {
                tracing::error!(
                    guild_id = new_member.guild_id.get(),
                    user_id = new_member.user.id.get(),
                    "Error handling member join: {}",
                    e
                );
            }
        }
        _ => {}
    }
    Ok(())
}
