// Routing for ordinary guild messages.
//
// Order matters: a flood violation ends processing, a Q&A match replaces the
// keyword replies and the XP award, and everything else gets keyword replies
// plus XP. The Discord layer only renders the outcome.

use crate::core::leveling::{LevelStore, LevelUpEvent, LevelingService};
use crate::core::moderation::{AntiSpamService, SpamAction, SpamError, SpamPolicy};
use crate::core::replies::{keyword_replies, QaTable, ReplyService};
use crate::core::store::ConfigStore;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The parts of a guild message the router looks at.
#[derive(Debug, Clone, Copy)]
pub struct IncomingMessage<'a> {
    pub guild_id: u64,
    pub user_id: u64,
    pub content: &'a str,
    /// The message's own creation time; flood windows are measured against it.
    pub sent_at: DateTime<Utc>,
}

/// What the bot should do in response to a message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// The author hit the flood limit and should be timed out.
    Flooded { duration: Duration, reason: String },
    /// A registered question matched; send only this answer.
    Answered(String),
    /// Keyword replies to send (possibly none) and a level-up to announce.
    Replied {
        keywords: Vec<&'static str>,
        level_up: Option<LevelUpEvent>,
    },
}

/// Run one message through flood control, Q&A, keywords and XP.
///
/// Only a failed flood check is returned as an error. Q&A and XP storage
/// failures are logged and the message carries on as if they found nothing.
pub async fn route_message<A, Q, L>(
    anti_spam: &AntiSpamService<A>,
    replies: &ReplyService<Q>,
    leveling: &LevelingService<L>,
    message: IncomingMessage<'_>,
) -> Result<MessageOutcome, SpamError>
where
    A: ConfigStore<SpamPolicy>,
    Q: ConfigStore<QaTable>,
    L: LevelStore,
{
    let action = anti_spam
        .check_message(message.guild_id, message.user_id, message.sent_at)
        .await?;
    if let SpamAction::Timeout { duration, reason } = action {
        return Ok(MessageOutcome::Flooded { duration, reason });
    }

    match replies.find_answer(message.guild_id, message.content).await {
        Ok(Some(answer)) => return Ok(MessageOutcome::Answered(answer)),
        Ok(None) => {}
        Err(e) => tracing::error!(guild_id = message.guild_id, "Q&A lookup failed: {}", e),
    }

    let keywords = keyword_replies(message.content);

    let level_up = match leveling.process_message(message.user_id).await {
        Ok(Some(level_up)) => {
            tracing::info!(
                user_id = level_up.user_id,
                old_level = level_up.old_level,
                new_level = level_up.new_level,
                "User leveled up"
            );
            Some(level_up)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::error!(user_id = message.user_id, "Failed to award XP: {}", e);
            None
        }
    };

    Ok(MessageOutcome::Replied { keywords, level_up })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::leveling::LevelRecord;
    use crate::infra::config::InMemoryConfigStore;
    use crate::infra::leveling::InMemoryLevelStore;
    use chrono::TimeZone;

    const GUILD: u64 = 456;
    const USER: u64 = 123;

    struct Bot {
        anti_spam: AntiSpamService<InMemoryConfigStore<SpamPolicy>>,
        replies: ReplyService<InMemoryConfigStore<QaTable>>,
        leveling: LevelingService<InMemoryLevelStore>,
    }

    impl Bot {
        fn new() -> Self {
            Self {
                anti_spam: AntiSpamService::new(InMemoryConfigStore::new()),
                replies: ReplyService::new(InMemoryConfigStore::new()),
                leveling: LevelingService::new(InMemoryLevelStore::new()),
            }
        }

        async fn send(&self, content: &str, secs: i64) -> MessageOutcome {
            let message = IncomingMessage {
                guild_id: GUILD,
                user_id: USER,
                content,
                sent_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            };
            route_message(&self.anti_spam, &self.replies, &self.leveling, message)
                .await
                .unwrap()
        }

        async fn xp(&self) -> u64 {
            self.leveling.get_record(USER).await.unwrap().xp
        }
    }

    #[tokio::test]
    async fn test_ordinary_message_gets_keywords_and_xp() {
        let bot = Bot::new();

        let outcome = bot.send("Good morning everyone", 0).await;
        assert_eq!(
            outcome,
            MessageOutcome::Replied {
                keywords: vec!["Good morning 🌞 Have a great day!"],
                level_up: None,
            }
        );
        assert_eq!(bot.xp().await, 10);
    }

    #[tokio::test]
    async fn test_flood_violation_stops_everything_else() {
        let bot = Bot::new();
        bot.anti_spam.set_policy(GUILD, 2, 10, 60).await.unwrap();
        bot.replies.set_answer(GUILD, "hi", "hello").await.unwrap();

        bot.send("first", 0).await;
        assert_eq!(bot.xp().await, 10);

        match bot.send("hi", 1).await {
            MessageOutcome::Flooded { duration, .. } => {
                assert_eq!(duration, Duration::from_secs(60));
            }
            other => panic!("expected a timeout, got {:?}", other),
        }
        // No answer was produced and no XP was awarded for the flooding message.
        assert_eq!(bot.xp().await, 10);
    }

    #[tokio::test]
    async fn test_answer_replaces_keywords_and_xp() {
        let bot = Bot::new();
        bot.replies
            .set_answer(GUILD, "goodbye", "See you around!")
            .await
            .unwrap();

        let outcome = bot.send("Goodbye", 0).await;
        assert_eq!(outcome, MessageOutcome::Answered("See you around!".to_string()));
        assert_eq!(bot.xp().await, 0);
    }

    #[tokio::test]
    async fn test_tenth_message_reports_level_up() {
        let bot = Bot::new();

        for i in 0..9 {
            bot.send("chatting", i * 60).await;
        }
        match bot.send("chatting", 600).await {
            MessageOutcome::Replied { keywords, level_up } => {
                assert!(keywords.is_empty());
                let level_up = level_up.expect("tenth message should level up");
                assert_eq!((level_up.old_level, level_up.new_level), (1, 2));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            bot.leveling.get_record(USER).await.unwrap(),
            LevelRecord { xp: 0, level: 2 }
        );
    }
}
