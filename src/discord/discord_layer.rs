// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "errors.rs"]
pub mod errors;

#[path = "events/event_router.rs"]
pub mod events;

#[path = "leveling/leveling_announcements.rs"]
pub mod leveling_announcements;

#[path = "moderation/moderation_layer.rs"]
pub mod moderation;

// Re-export command types for convenience
pub use commands::{Context, Data, Error};
