// New members: the public welcome post and the private join DM.

use crate::core::errors::CommandError;
use crate::discord::errors::{classify, classify_dm};
use crate::discord::{Data, Error};
use poise::serenity_prelude::{self as serenity, CreateMessage, Mentionable};

pub async fn handle_member_join(
    ctx: &serenity::Context,
    member: &serenity::Member,
    data: &Data,
) -> Result<(), Error> {
    let guild_id = member.guild_id.get();
    let mention = member.mention().to_string();

    if let Some(post) = data.onboarding.welcome_for(guild_id, &mention).await? {
        send_welcome(ctx, guild_id, post.channel_id, &post.content).await;
    }

    if let Some(text) = data.onboarding.join_dm_for(guild_id, &mention).await? {
        let sent = member
            .user
            .direct_message(&ctx.http, CreateMessage::new().content(text))
            .await;

        if let Err(e) = sent {
            match classify_dm(&e) {
                CommandError::RecipientUnreachable => tracing::warn!(
                    guild_id,
                    user_id = member.user.id.get(),
                    "Could not send join DM: recipient does not accept DMs"
                ),
                other => tracing::error!(
                    guild_id,
                    user_id = member.user.id.get(),
                    "Failed to send join DM: {}",
                    other
                ),
            }
        }
    }

    Ok(())
}

/// `channel_id` comes from a `WelcomeConfig`, which never holds zero.
async fn send_welcome(ctx: &serenity::Context, guild_id: u64, channel_id: u64, content: &str) {
    let channel = serenity::ChannelId::new(channel_id);
    if let Err(e) = channel.say(&ctx.http, content).await {
        match classify(&e) {
            CommandError::NotFound(_) => tracing::debug!(
                guild_id,
                channel_id,
                "Welcome channel no longer exists, skipping"
            ),
            other => tracing::warn!(
                guild_id,
                channel_id,
                "Failed to send welcome message: {}",
                other
            ),
        }
    }
}
