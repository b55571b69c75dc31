// Storage port for per-guild configuration documents.
//
// Every admin-authored document (welcome message, join DM, Q&A table, anti-spam
// policy) is a map of guild id -> value. The core reads, overwrites, edits or
// drops one entry at a time; how the map is kept on disk is the
// infra layer's business.

use crate::core::errors::CommandError;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Config not found")]
    NotFound,
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CommandError::not_found("that configuration entry"),
            other => CommandError::RemoteService(other.to_string()),
        }
    }
}

/// A guild-keyed document. Writes are whole-document and synchronous.
#[async_trait]
pub trait ConfigStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, guild_id: u64) -> Result<Option<V>, StoreError>;

    /// Insert or overwrite the entry for a guild and persist the document.
    async fn put(&self, guild_id: u64, value: V) -> Result<(), StoreError>;

    /// Remove the entry for a guild. Returns `StoreError::NotFound` if absent.
    async fn remove(&self, guild_id: u64) -> Result<(), StoreError>;

    /// Edit a guild's entry in place and persist the result. No other write to
    /// the document can interleave between reading the slot and storing it.
    /// Leaving the slot `None` drops the entry.
    async fn update<F, T>(&self, guild_id: u64, edit: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Option<V>) -> T + Send,
        T: Send;
}
