// Anti-spam slash commands for configuration.

use crate::core::moderation::{SpamError, MAX_MUTE_SECS};
use crate::core::store::StoreError;
use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Enable flood control: time out anyone who sends `limit` messages within `window` seconds.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn set_antispam(
    ctx: Context<'_>,
    #[description = "Messages allowed within the window before acting"]
    #[min = 1]
    limit: u32,
    #[description = "Window length in seconds"]
    #[min = 1]
    #[max = 2419200]
    window: u64,
    #[description = "Timeout length in seconds"]
    #[min = 1]
    #[max = 2419200]
    mute: u64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let policy = match ctx
        .data()
        .anti_spam
        .set_policy(guild_id.get(), limit, window, mute)
        .await
    {
        Ok(policy) => policy,
        Err(e) => return reply_error(ctx, e).await,
    };

    tracing::info!(
        guild_id = guild_id.get(),
        limit = policy.limit(),
        window = policy.window_secs(),
        mute = policy.mute_secs(),
        "Anti-spam policy updated"
    );

    ctx.say(format!(
        "✅ Anti-spam enabled: {} messages within {} seconds → {} second timeout",
        policy.limit(),
        policy.window_secs(),
        policy.mute_secs()
    ))
    .await?;
    Ok(())
}

/// Turn flood control off for this server.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn disable_antispam(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    match ctx.data().anti_spam.disable(guild_id.get()).await {
        Ok(()) => {}
        Err(SpamError::StorageError(StoreError::NotFound)) => {
            ctx.say("ℹ️ Anti-spam is not enabled for this server").await?;
            return Ok(());
        }
        Err(e) => return reply_error(ctx, e).await,
    }

    ctx.say("✅ Anti-spam disabled for this server").await?;
    Ok(())
}

/// Show the current anti-spam settings.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn antispam_status(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let policy = match ctx.data().anti_spam.get_policy(guild_id.get()).await {
        Ok(policy) => policy,
        Err(e) => return reply_error(ctx, e).await,
    };

    let embed = match policy {
        Some(policy) => serenity::CreateEmbed::new()
            .title("🛡️ Anti-Spam Status")
            .color(0x00FF00)
            .field("Status", "✅ Enabled", false)
            .field(
                "Rate Limit",
                format!(
                    "{} messages / {} seconds",
                    policy.limit(),
                    policy.window_secs()
                ),
                true,
            )
            .field("Timeout", format!("{} seconds", policy.mute_secs()), true),
        None => serenity::CreateEmbed::new()
            .title("🛡️ Anti-Spam Status")
            .color(0xFF0000)
            .field("Status", "❌ Disabled", false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Use /set_antispam to enable it (timeouts up to {} days)",
                MAX_MUTE_SECS / 86_400
            ))),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
