// Q&A table management.

use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Discord embeds hold at most 25 fields of up to 1024 characters each.
const MAX_LISTED: usize = 25;
const MAX_FIELD_LEN: usize = 1024;

/// Reply with `answer` whenever someone sends exactly `question`.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn set_answer(
    ctx: Context<'_>,
    #[description = "Question to match (case-insensitive)"] question: String,
    #[description = "Answer to send back"] answer: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let key = match ctx
        .data()
        .replies
        .set_answer(guild_id.get(), &question, &answer)
        .await
    {
        Ok(key) => key,
        Err(e) => return reply_error(ctx, e).await,
    };

    ctx.say(format!("✅ Q&A set: `{}` → {}", key, answer)).await?;
    Ok(())
}

/// Stop answering a question.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn remove_answer(
    ctx: Context<'_>,
    #[description = "Question to forget"] question: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    if let Err(e) = ctx
        .data()
        .replies
        .remove_answer(guild_id.get(), &question)
        .await
    {
        return reply_error(ctx, e).await;
    }

    ctx.say(format!("🗑️ Removed the answer for `{}`", question.trim()))
        .await?;
    Ok(())
}

/// List every question this server answers.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn answers(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    let entries = match ctx.data().replies.list(guild_id.get()).await {
        Ok(entries) => entries,
        Err(e) => return reply_error(ctx, e).await,
    };

    if entries.is_empty() {
        ctx.say("📭 No answers configured yet. Add one with /set_answer")
            .await?;
        return Ok(());
    }

    let total = entries.len();
    let mut embed = serenity::CreateEmbed::new()
        .title("💬 Q&A")
        .color(0x5865F2);
    for (question, answer) in entries.into_iter().take(MAX_LISTED) {
        embed = embed.field(question, clip(&answer, MAX_FIELD_LEN), false);
    }
    if total > MAX_LISTED {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Showing {} of {} entries",
            MAX_LISTED, total
        )));
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip("hello", 10), "hello");
    }

    #[test]
    fn clip_marks_cut_text() {
        let clipped = clip(&"a".repeat(2000), MAX_FIELD_LEN);
        assert_eq!(clipped.chars().count(), MAX_FIELD_LEN);
        assert!(clipped.ends_with('…'));
    }
}
