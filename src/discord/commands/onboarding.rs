// Welcome message and join DM configuration.

use crate::core::onboarding::USER_PLACEHOLDER;
use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

/// Post a welcome message in a channel whenever someone joins.
///
/// `{user}` in the message is replaced with the new member's mention.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn set_welcome(
    ctx: Context<'_>,
    #[description = "Channel to post the welcome message in"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "Welcome message, {user} becomes the new member's mention"] message: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    if let Err(e) = ctx
        .data()
        .onboarding
        .set_welcome(guild_id.get(), channel.id.get(), &message)
        .await
    {
        return reply_error(ctx, e).await;
    }

    ctx.say(format!(
        "✅ Welcome message set!\nChannel: {}\nMessage: {}",
        channel.mention(),
        message
    ))
    .await?;
    Ok(())
}

/// DM every new member a message when they join.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn set_join_dm(
    ctx: Context<'_>,
    #[description = "Message to DM new members, {user} becomes their mention"] message: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    if let Err(e) = ctx
        .data()
        .onboarding
        .set_join_dm(guild_id.get(), &message)
        .await
    {
        return reply_error(ctx, e).await;
    }

    let hint = if message.contains(USER_PLACEHOLDER) {
        ""
    } else {
        "\n(Tip: add {user} to mention the new member)"
    };
    ctx.say(format!("✅ Join DM set: {}{}", message, hint)).await?;
    Ok(())
}
