// Small utility and fun commands.

use crate::core::fun::{choose as pick_one, roll_die, validate_repeat};
use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};

/// Say hello.
#[poise::command(slash_command)]
pub async fn hello(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Hello! 👋").await?;
    Ok(())
}

/// Show the gateway latency.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.say(format!("🏓 Pong! Latency: {}ms", latency.as_millis())).await?;
    Ok(())
}

/// Make the bot say something.
#[poise::command(slash_command)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "What should I say?"] message: String,
) -> Result<(), Error> {
    ctx.say(message).await?;
    Ok(())
}

/// Send a message up to 5 times.
#[poise::command(slash_command)]
pub async fn repeat(
    ctx: Context<'_>,
    #[description = "How many times (1-5)"] times: u32,
    #[description = "Message to repeat"] message: String,
) -> Result<(), Error> {
    let times = match validate_repeat(times) {
        Ok(times) => times,
        Err(e) => return reply_error(ctx, e).await,
    };

    ctx.defer_ephemeral().await?;

    let channel_id = ctx.channel_id();
    for _ in 0..times {
        if let Err(e) = channel_id.say(ctx.http(), &message).await {
            tracing::warn!("Failed to send repeated message: {}", e);
        }
    }

    ctx.say("✅ Done repeating").await?;
    Ok(())
}

/// Roll a six-sided die.
#[poise::command(slash_command)]
pub async fn dice(ctx: Context<'_>) -> Result<(), Error> {
    let roll = roll_die(&mut rand::thread_rng());
    ctx.say(format!("🎲 You rolled a {}", roll)).await?;
    Ok(())
}

/// Let the bot pick one of two or three options.
#[poise::command(slash_command)]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "First option"] option1: String,
    #[description = "Second option"] option2: String,
    #[description = "Third option"] option3: Option<String>,
) -> Result<(), Error> {
    let options: Vec<String> = [Some(option1), Some(option2), option3]
        .into_iter()
        .flatten()
        .collect();

    let picked = pick_one(&options, &mut rand::thread_rng()).cloned();
    match picked {
        Some(picked) => ctx.say(format!("🤔 I choose: {}", picked)).await?,
        None => ctx.say("🤷 Nothing to choose from").await?,
    };
    Ok(())
}
