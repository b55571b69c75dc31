// Discord commands module.
// Each feature gets its own command file.

use crate::core::ai::AiService;
use crate::core::leveling::LevelingService;
use crate::core::moderation::{AntiSpamService, SpamPolicy};
use crate::core::onboarding::{OnboardingService, WelcomeConfig};
use crate::core::replies::{QaTable, ReplyService};
use crate::infra::ai::OpenAiClient;
use crate::infra::config::JsonConfigStore;
use crate::infra::leveling::JsonLevelStore;
use std::sync::Arc;

pub mod ai;

pub mod fun;

pub mod leveling;

pub mod messaging;

pub mod onboarding;

// Add a new module for bot presence management
pub mod presence;

pub mod replies;

/// Type alias for our bot's context.
/// This is what every command receives as its first parameter.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands and event handlers.
/// This is where we store our services and configuration.
pub struct Data {
    pub leveling: Arc<LevelingService<JsonLevelStore>>,
    pub anti_spam: Arc<AntiSpamService<JsonConfigStore<SpamPolicy>>>,
    pub replies: Arc<ReplyService<JsonConfigStore<QaTable>>>,
    pub onboarding: Arc<OnboardingService<JsonConfigStore<WelcomeConfig>, JsonConfigStore<String>>>,
    /// `None` when no AI key is configured.
    pub ai: Option<Arc<AiService<OpenAiClient>>>,
}

/// Every slash command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        onboarding::set_welcome(),
        onboarding::set_join_dm(),
        crate::discord::moderation::commands::set_antispam(),
        crate::discord::moderation::commands::disable_antispam(),
        crate::discord::moderation::commands::antispam_status(),
        replies::set_answer(),
        replies::remove_answer(),
        replies::answers(),
        fun::hello(),
        fun::ping(),
        fun::say(),
        fun::repeat(),
        fun::dice(),
        fun::choose(),
        messaging::dm(),
        messaging::dm_user(),
        leveling::level(),
        leveling::rank(),
        ai::ai(),
    ]
}
