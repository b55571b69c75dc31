// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (JSON documents, AI API)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::config::AppConfig;
use crate::core::ai::{AiConfig, AiService};
use crate::core::leveling::LevelingService;
use crate::core::moderation::AntiSpamService;
use crate::core::onboarding::OnboardingService;
use crate::core::replies::ReplyService;
use crate::discord::events::event_handler;
use crate::discord::Data;
use crate::infra::ai::OpenAiClient;
use crate::infra::config::JsonConfigStore;
use crate::infra::leveling::JsonLevelStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    let data_dir = config.ensure_data_dir()?;
    tracing::info!(data_dir = %data_dir.display(), "Using data directory");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let leveling_service = Arc::new(LevelingService::new(JsonLevelStore::new(
        config.document("levels.json"),
    )));

    let anti_spam_service = Arc::new(AntiSpamService::new(JsonConfigStore::new(
        config.document("antispam.json"),
    )));

    let reply_service = Arc::new(ReplyService::new(JsonConfigStore::new(
        config.document("qa.json"),
    )));

    let onboarding_service = Arc::new(OnboardingService::new(
        JsonConfigStore::new(config.document("welcome_config.json")),
        JsonConfigStore::new(config.document("join_dm.json")),
    ));

    let ai_service = match &config.ai {
        Some(settings) => {
            tracing::info!(model = %settings.model, base_url = %settings.base_url, "AI enabled");
            let client = OpenAiClient::new(settings.api_key.clone(), settings.base_url.clone());
            let ai_config = AiConfig {
                model: settings.model.clone(),
                temperature: settings.temperature,
                max_tokens: Some(settings.max_tokens),
            };
            Some(Arc::new(AiService::new(
                client,
                settings.system_prompt.clone(),
                ai_config,
            )))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, /ai will be unavailable");
            None
        }
    };

    // Create the data structure that will be shared across all commands
    let data = Data {
        leveling: leveling_service,
        anti_spam: anti_spam_service,
        replies: reply_service,
        onboarding: onboarding_service,
        ai: ai_service,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Configure the poise framework with our commands and settings.

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS; // Required for member joins

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            // Event handler for messages and member joins
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                // Register slash commands globally (can take up to an hour to propagate)
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!(
                    commands = framework.options().commands.len(),
                    "Commands registered"
                );

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}
