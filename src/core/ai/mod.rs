pub mod ai_service;
pub mod formatting;
pub mod models;

pub use ai_service::{AiError, AiProvider, AiService};
pub use formatting::{split_for_discord, DISCORD_MESSAGE_LIMIT};
pub use models::{AiConfig, AiMessage};
