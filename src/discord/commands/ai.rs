// One-shot AI replies.

use crate::core::ai::{split_for_discord, DISCORD_MESSAGE_LIMIT};
use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};

/// Ask the AI something.
#[poise::command(slash_command)]
pub async fn ai(
    ctx: Context<'_>,
    #[description = "What do you want to ask?"] message: String,
) -> Result<(), Error> {
    let Some(ai) = ctx.data().ai.clone() else {
        ctx.say("❌ The AI is not configured. Set OPENAI_API_KEY to enable it.")
            .await?;
        return Ok(());
    };

    // Completions can take longer than the interaction deadline.
    ctx.defer().await?;

    let answer = match ai.reply(&message).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::error!(user_id = ctx.author().id.get(), "AI request failed: {}", e);
            return reply_error(ctx, e).await;
        }
    };

    for chunk in split_for_discord(&answer, DISCORD_MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}
