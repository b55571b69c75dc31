// This is the leveling module - it contains ALL the business logic for the leveling system.
// Notice how this module has NO Discord-specific code (no serenity, no poise imports).
// It works with primitive types (u64) so it could be driven from any frontend.

use crate::core::errors::CommandError;
use async_trait::async_trait;
use thiserror::Error;

/// XP awarded for an ordinary message.
pub const XP_PER_MESSAGE: u64 = 10;

/// Each level costs `level * XP_PER_LEVEL` experience to clear.
pub const XP_PER_LEVEL: u64 = 100;

/// Leaderboard size when the caller does not ask for one.
pub const DEFAULT_RANK_SIZE: usize = 5;

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// A user's progress. Tracked once per user, across every guild the bot is in.
///
/// At rest `xp < level * XP_PER_LEVEL`; crossing that threshold bumps the level
/// and resets `xp` to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRecord {
    pub xp: u64,
    pub level: u32,
}

impl Default for LevelRecord {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

impl LevelRecord {
    /// XP needed to leave the current level.
    pub fn threshold(&self) -> u64 {
        self.level as u64 * XP_PER_LEVEL
    }

    /// Apply an XP gain. Returns the new record and whether the level went up.
    ///
    /// Only one level can be gained per call, even if `gain` would cover several
    /// thresholds; the leftover XP is discarded.
    pub fn gain(self, gain: u64) -> (LevelRecord, bool) {
        let xp = self.xp.saturating_add(gain);
        if xp >= self.threshold() {
            (
                LevelRecord {
                    xp: 0,
                    level: self.level.saturating_add(1),
                },
                true,
            )
        } else {
            (
                LevelRecord {
                    xp,
                    level: self.level,
                },
                false,
            )
        }
    }
}

/// Returned by the service so the Discord layer can announce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpEvent {
    pub user_id: u64,
    pub old_level: u32,
    pub new_level: u32,
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub user_id: u64,
    pub record: LevelRecord,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LevelingError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid user ID")]
    InvalidId,
}

impl From<LevelingError> for CommandError {
    fn from(err: LevelingError) -> Self {
        match err {
            LevelingError::InvalidId => CommandError::validation(err.to_string()),
            LevelingError::StorageError(msg) => CommandError::RemoteService(msg),
        }
    }
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================
// The core defines WHAT it needs, the infra layer decides HOW it's stored.

#[async_trait]
pub trait LevelStore: Send + Sync {
    /// Get a user's record, or `None` if they have never earned XP.
    async fn get_record(&self, user_id: u64) -> Result<Option<LevelRecord>, LevelingError>;

    /// Replace a user's record with `update(current)` and persist it, as one
    /// step with respect to other callers. Unknown users start from the default
    /// record. Returns the records before and after the update.
    async fn update_record<F>(
        &self,
        user_id: u64,
        update: F,
    ) -> Result<(LevelRecord, LevelRecord), LevelingError>
    where
        F: FnOnce(LevelRecord) -> LevelRecord + Send;

    /// Every known record, in no particular order.
    async fn all_records(&self) -> Result<Vec<(u64, LevelRecord)>, LevelingError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// The main service for leveling operations.
pub struct LevelingService<S: LevelStore> {
    store: S,

    /// How much XP to award per message.
    xp_per_message: u64,
}

impl<S: LevelStore> LevelingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            xp_per_message: XP_PER_MESSAGE,
        }
    }

    fn validate_id(user_id: u64) -> Result<(), LevelingError> {
        if user_id == 0 {
            Err(LevelingError::InvalidId)
        } else {
            Ok(())
        }
    }

    /// Award the per-message XP to a user.
    ///
    /// **Returns:**
    /// - `Ok(Some(LevelUpEvent))` if the user leveled up
    /// - `Ok(None)` if XP was awarded but no level up occurred
    pub async fn process_message(
        &self,
        user_id: u64,
    ) -> Result<Option<LevelUpEvent>, LevelingError> {
        self.award_xp(user_id, self.xp_per_message).await
    }

    /// Award an arbitrary amount of XP and persist the result.
    pub async fn award_xp(
        &self,
        user_id: u64,
        gain: u64,
    ) -> Result<Option<LevelUpEvent>, LevelingError> {
        Self::validate_id(user_id)?;

        let (before, after) = self
            .store
            .update_record(user_id, |current| current.gain(gain).0)
            .await?;

        if after.level > before.level {
            Ok(Some(LevelUpEvent {
                user_id,
                old_level: before.level,
                new_level: after.level,
            }))
        } else {
            Ok(None)
        }
    }

    /// Get a user's record, falling back to the starting record.
    pub async fn get_record(&self, user_id: u64) -> Result<LevelRecord, LevelingError> {
        Self::validate_id(user_id)?;
        Ok(self.store.get_record(user_id).await?.unwrap_or_default())
    }

    /// Top users by level, then XP. `top` is clamped to the number of known users.
    pub async fn ranking(&self, top: usize) -> Result<Vec<RankEntry>, LevelingError> {
        let mut entries: Vec<RankEntry> = self
            .store
            .all_records()
            .await?
            .into_iter()
            .map(|(user_id, record)| RankEntry { user_id, record })
            .collect();

        entries.sort_by(|a, b| {
            b.record
                .level
                .cmp(&a.record.level)
                .then(b.record.xp.cmp(&a.record.xp))
                .then(a.user_id.cmp(&b.user_id))
        });
        entries.truncate(top);
        Ok(entries)
    }
}

// ============================================================================
// TESTS
// ============================================================================
