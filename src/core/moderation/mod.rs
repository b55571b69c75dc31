// Core moderation module - contains the flood-control business logic.

pub mod flood_monitor;
pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
