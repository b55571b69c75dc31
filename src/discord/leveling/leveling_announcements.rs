use crate::core::leveling::LevelUpEvent;
use poise::serenity_prelude::{self as serenity, builder::CreateMessage};
use rand::seq::SliceRandom;

/// Announce a level-up in the channel where the triggering message was sent.
pub async fn send_level_up_embed(
    ctx: &serenity::Context,
    message: &serenity::Message,
    level_up: &LevelUpEvent,
) -> Result<(), serenity::Error> {
    let embed = serenity::CreateEmbed::new()
        .title("Level Up!")
        .description(format!(
            "🎉 Congrats <@{}>, you reached Lv.{}!",
            level_up.user_id, level_up.new_level
        ))
        .color(level_color(level_up.new_level))
        .footer(serenity::CreateEmbedFooter::new(random_flavor_line()));

    message
        .channel_id
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
        .map(|_| ())
}

fn level_color(level: u32) -> serenity::Colour {
    if level >= 20 {
        serenity::Colour::DARK_PURPLE
    } else if level >= 10 {
        serenity::Colour::GOLD
    } else if level >= 5 {
        serenity::Colour::BLURPLE
    } else {
        serenity::Colour::LIGHT_GREY
    }
}

fn random_flavor_line() -> &'static str {
    const FLAVOR_LINES: [&str; 3] = [
        "Keep chatting!",
        "The next level needs 100 more XP than this one.",
        "Check /rank to see where you stand.",
    ];

    FLAVOR_LINES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FLAVOR_LINES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_tiers_follow_level() {
        assert_eq!(level_color(1), serenity::Colour::LIGHT_GREY);
        assert_eq!(level_color(5), serenity::Colour::BLURPLE);
        assert_eq!(level_color(12), serenity::Colour::GOLD);
        assert_eq!(level_color(40), serenity::Colour::DARK_PURPLE);
    }
}
