// Anti-spam service - core business logic for flood control.
//
// This service handles:
// - Looking up the guild's policy (no policy = flood control disabled)
// - Feeding messages into the sliding-window monitor
// - Turning a violation into a timeout action
//
// NO Discord dependencies here - just pure domain logic.

use super::flood_monitor::FloodMonitor;
use super::moderation_models::{SpamAction, SpamPolicy};
use crate::core::errors::CommandError;
use crate::core::store::{ConfigStore, StoreError};
use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum SpamError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error("Invalid anti-spam policy: {0}")]
    InvalidPolicy(String),
}

impl From<SpamError> for CommandError {
    fn from(err: SpamError) -> Self {
        match err {
            SpamError::StorageError(e) => e.into(),
            SpamError::InvalidPolicy(msg) => CommandError::Validation(msg),
        }
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Anti-spam service for detecting and handling message floods.
pub struct AntiSpamService<S: ConfigStore<SpamPolicy>> {
    store: S,
    monitor: FloodMonitor,
}

impl<S: ConfigStore<SpamPolicy>> AntiSpamService<S> {
    /// Create a new anti-spam service with the given policy store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            monitor: FloodMonitor::new(),
        }
    }

    /// Check a message for flooding.
    ///
    /// # Arguments
    /// * `guild_id` - The guild where the message was sent
    /// * `user_id` - The user who sent the message
    /// * `sent_at` - The message's own creation timestamp
    ///
    /// # Returns
    /// `SpamAction::Timeout` when the user hit the limit, otherwise `SpamAction::None`.
    pub async fn check_message(
        &self,
        guild_id: u64,
        user_id: u64,
        sent_at: DateTime<Utc>,
    ) -> Result<SpamAction, SpamError> {
        let Some(policy) = self.store.get(guild_id).await? else {
            return Ok(SpamAction::None);
        };

        if !self.monitor.record(guild_id, user_id, sent_at, &policy) {
            return Ok(SpamAction::None);
        }

        tracing::info!(
            guild_id,
            user_id,
            limit = policy.limit(),
            window_secs = policy.window_secs(),
            "Flood limit reached"
        );

        Ok(SpamAction::Timeout {
            duration: policy.mute(),
            reason: format!(
                "Flooding: {} messages within {} seconds",
                policy.limit(),
                policy.window_secs()
            ),
        })
    }

    /// Get the current policy for a guild.
    pub async fn get_policy(&self, guild_id: u64) -> Result<Option<SpamPolicy>, SpamError> {
        Ok(self.store.get(guild_id).await?)
    }

    /// Validate and store a policy for a guild, replacing any previous one.
    pub async fn set_policy(
        &self,
        guild_id: u64,
        limit: u32,
        window_secs: u64,
        mute_secs: u64,
    ) -> Result<SpamPolicy, SpamError> {
        let policy =
            SpamPolicy::new(limit, window_secs, mute_secs).map_err(SpamError::InvalidPolicy)?;
        self.store.put(guild_id, policy).await?;
        Ok(policy)
    }

    /// Remove a guild's policy, turning flood control off.
    pub async fn disable(&self, guild_id: u64) -> Result<(), SpamError> {
        self.store.remove(guild_id).await?;
        self.monitor.forget_guild(guild_id);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::InMemoryConfigStore;
    use chrono::TimeZone;
    use std::time::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_no_policy_passes_everything() {
        let service = AntiSpamService::new(InMemoryConfigStore::new());

        for i in 0..50 {
            let sent_at = at(0) + chrono::Duration::milliseconds(i);
            let action = service.check_message(456, 123, sent_at).await.unwrap();
            assert_eq!(action, SpamAction::None);
        }
    }

    #[tokio::test]
    async fn test_flood_triggers_timeout() {
        let service = AntiSpamService::new(InMemoryConfigStore::new());
        service.set_policy(456, 3, 10, 60).await.unwrap();

        assert!(!service.check_message(456, 123, at(0)).await.unwrap().is_violation());
        assert!(!service.check_message(456, 123, at(1)).await.unwrap().is_violation());

        let action = service.check_message(456, 123, at(2)).await.unwrap();
        match action {
            SpamAction::Timeout { duration, reason } => {
                assert_eq!(duration, Duration::from_secs(60));
                assert!(reason.contains("3 messages"));
            }
            SpamAction::None => panic!("expected a timeout"),
        }

        // The window starts over after a violation.
        assert!(!service.check_message(456, 123, at(3)).await.unwrap().is_violation());
    }

    #[tokio::test]
    async fn test_invalid_policy_is_rejected() {
        let service = AntiSpamService::new(InMemoryConfigStore::new());

        let err = service.set_policy(456, 0, 10, 60).await.unwrap_err();
        assert!(matches!(err, SpamError::InvalidPolicy(_)));
        assert!(service.get_policy(456).await.unwrap().is_none());

        let command_err: CommandError = err.into();
        assert!(matches!(command_err, CommandError::Validation(_)));
    }

    #[tokio::test]
    async fn test_disable_turns_flood_control_off() {
        let service = AntiSpamService::new(InMemoryConfigStore::new());
        service.set_policy(456, 2, 10, 60).await.unwrap();

        assert!(!service.check_message(456, 123, at(0)).await.unwrap().is_violation());
        service.disable(456).await.unwrap();

        for i in 1..5 {
            assert!(!service.check_message(456, 123, at(i)).await.unwrap().is_violation());
        }
        assert!(matches!(
            service.disable(456).await,
            Err(SpamError::StorageError(StoreError::NotFound))
        ));
    }
}
