// Discord commands for the leveling system.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call core service
// 3. Format the response based on the result
//
// This layer is THIN - no business logic, just translation.

use crate::core::leveling::DEFAULT_RANK_SIZE;
use crate::discord::errors::reply_error;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Discord rejects embed descriptions longer than this many characters.
const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Show your current level and XP.
#[poise::command(slash_command, guild_only)]
pub async fn level(
    ctx: Context<'_>,
    #[description = "Member to check (defaults to you)"] member: Option<serenity::Member>,
) -> Result<(), Error> {
    let (user, name) = match &member {
        Some(member) => (&member.user, member.display_name().to_string()),
        None => (ctx.author(), ctx.author().display_name().to_string()),
    };

    if user.bot {
        ctx.say("Bots don't have levels! 🤖").await?;
        return Ok(());
    }

    let record = match ctx.data().leveling.get_record(user.id.get()).await {
        Ok(record) => record,
        Err(e) => return reply_error(ctx, e).await,
    };

    let progress = record.xp as f64 / record.threshold().max(1) as f64;
    let embed = serenity::CreateEmbed::new()
        .title(format!("📊 {}", name))
        .color(0x00ff00)
        .thumbnail(user.face())
        .field("Level", format!("**Lv.{}**", record.level), true)
        .field("XP", format!("{}/{}", record.xp, record.threshold()), true)
        .field("Progress", build_progress_bar(progress, 15), false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show the top members by level.
#[poise::command(slash_command, guild_only)]
pub async fn rank(
    ctx: Context<'_>,
    #[description = "How many members to show (default: 5)"]
    #[min = 1]
    top: Option<usize>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in servers")?;

    let top = top.unwrap_or(DEFAULT_RANK_SIZE);
    let ranking = match ctx.data().leveling.ranking(top).await {
        Ok(ranking) => ranking,
        Err(e) => return reply_error(ctx, e).await,
    };

    if ranking.is_empty() {
        ctx.say("📉 No data yet! Start chatting to get on the leaderboard 💬").await?;
        return Ok(());
    }

    let lines: Vec<String> = ranking
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rank = index + 1;
            let medal = match rank {
                1 => "🥇",
                2 => "🥈",
                3 => "🥉",
                _ => "▫️",
            };
            format!(
                "{} **#{}** {} · Lv.{} ({} XP)",
                medal,
                rank,
                resolve_display_name_cached(&ctx, guild_id, entry.user_id),
                entry.record.level,
                entry.record.xp
            )
        })
        .collect();

    let (description, shown) = fit_lines(&lines, EMBED_DESCRIPTION_LIMIT);
    let mut embed = serenity::CreateEmbed::new()
        .title("🏆 Leaderboard")
        .color(0xFFD700)
        .description(description);
    if shown < lines.len() {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Showing {} of {} entries",
            shown,
            lines.len()
        )));
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Resolve a display name from the cache only, so the leaderboard never waits on HTTP.
fn resolve_display_name_cached(
    ctx: &Context<'_>,
    guild_id: serenity::GuildId,
    user_id: u64,
) -> String {
    let user_id_s = serenity::UserId::new(user_id);

    // display_name() prefers nick over username
    if let Some(guild) = ctx.serenity_context().cache.guild(guild_id) {
        if let Some(member) = guild.members.get(&user_id_s) {
            return member.display_name().to_string();
        }
    }

    if let Some(user) = ctx.serenity_context().cache.user(user_id_s) {
        return user.name.clone();
    }

    format!("Unknown user ({})", user_id)
}

/// Join whole lines until the next one would push the text past `limit`
/// characters. Returns the text and how many lines made it in.
fn fit_lines(lines: &[String], limit: usize) -> (String, usize) {
    let mut text = String::new();
    let mut used = 0;
    let mut shown = 0;
    for line in lines {
        let cost = line.chars().count() + 1;
        if used + cost > limit {
            break;
        }
        text.push_str(line);
        text.push('\n');
        used += cost;
        shown += 1;
    }
    (text, shown)
}

fn build_progress_bar(progress: f64, length: usize) -> String {
    let clamped = progress.clamp(0.0, 1.0);
    let mut filled = (clamped * length as f64).round() as usize;
    if clamped > 0.0 && filled == 0 {
        filled = 1;
    }
    filled = filled.min(length);
    let bar = "▰".repeat(filled) + &"▱".repeat(length - filled);
    format!("{} ({}%)", bar, (clamped * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(build_progress_bar(0.0, 4), "▱▱▱▱ (0%)");
        assert_eq!(build_progress_bar(0.5, 4), "▰▰▱▱ (50%)");
        assert_eq!(build_progress_bar(1.5, 4), "▰▰▰▰ (100%)");
    }

    #[test]
    fn fit_lines_keeps_everything_that_fits() {
        let lines = vec!["a".to_string(), "bb".to_string()];
        assert_eq!(fit_lines(&lines, 100), ("a\nbb\n".to_string(), 2));
    }

    #[test]
    fn fit_lines_stops_at_the_description_limit() {
        let lines: Vec<String> = (1..=200)
            .map(|rank| {
                format!(
                    "▫️ **#{}** Unknown user (123456789012345678) · Lv.42 (4100 XP)",
                    rank
                )
            })
            .collect();

        let (text, shown) = fit_lines(&lines, EMBED_DESCRIPTION_LIMIT);
        assert!(shown < lines.len());
        assert!(shown > 0);
        assert!(text.chars().count() <= EMBED_DESCRIPTION_LIMIT);
        assert_eq!(text.lines().count(), shown);
        assert!(text.ends_with("Lv.42 (4100 XP)\n"));
    }

    #[test]
    fn progress_bar_shows_any_progress() {
        assert_eq!(build_progress_bar(0.01, 10), "▰▱▱▱▱▱▱▱▱▱ (1%)");
    }
}
