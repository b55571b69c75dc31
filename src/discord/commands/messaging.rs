// Direct messages sent on behalf of the invoking user.

use crate::core::fun::parse_user_id;
use crate::discord::errors::{classify, classify_dm, reply_error};
use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, CreateMessage};

/// DM a member of this server.
#[poise::command(slash_command, guild_only)]
pub async fn dm(
    ctx: Context<'_>,
    #[description = "Who to message"] member: serenity::Member,
    #[description = "What to send"] message: String,
) -> Result<(), Error> {
    send_dm(ctx, &member.user, &message).await
}

/// DM any user by their numeric ID.
#[poise::command(slash_command)]
pub async fn dm_user(
    ctx: Context<'_>,
    #[description = "The user's numeric ID"] user_id: String,
    #[description = "What to send"] message: String,
) -> Result<(), Error> {
    let id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(e) => return reply_error(ctx, e).await,
    };

    let user = match serenity::UserId::new(id).to_user(ctx.serenity_context()).await {
        Ok(user) => user,
        Err(e) => return reply_error(ctx, classify(&e)).await,
    };

    send_dm(ctx, &user, &message).await
}

async fn send_dm(ctx: Context<'_>, user: &serenity::User, message: &str) -> Result<(), Error> {
    if user.bot {
        ctx.send(
            poise::CreateReply::default()
                .content("🤖 Bots can't receive DMs from me.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    if let Err(e) = user
        .direct_message(ctx.serenity_context(), CreateMessage::new().content(message))
        .await
    {
        tracing::warn!(user_id = user.id.get(), "Failed to send DM: {}", e);
        return reply_error(ctx, classify_dm(&e)).await;
    }

    ctx.send(
        poise::CreateReply::default()
            .content(format!("📨 Sent a DM to {}", user.name))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
