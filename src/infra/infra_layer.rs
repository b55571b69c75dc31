// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "config/mod.rs"]
pub mod config;

#[path = "leveling/leveling_store.rs"]
pub mod leveling;

#[path = "ai/mod.rs"]
pub mod ai;
