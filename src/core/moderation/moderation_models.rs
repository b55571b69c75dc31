// Moderation domain models - data structures for the flood-control system.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer will convert these to Discord-specific actions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest timeout the platform accepts (28 days).
pub const MAX_MUTE_SECS: u64 = 28 * 24 * 60 * 60;

/// Longest flood window (28 days). Older messages are never counted.
pub const MAX_WINDOW_SECS: u64 = 28 * 24 * 60 * 60;

/// What action should be taken for a message.
#[derive(Debug, Clone, PartialEq)]
pub enum SpamAction {
    /// No action needed - message passes through to the other handlers
    None,
    /// Apply a Discord timeout and stop processing the message
    Timeout { duration: Duration, reason: String },
}

#[cfg(test)]
impl SpamAction {
    pub fn is_violation(&self) -> bool {
        !matches!(self, SpamAction::None)
    }
}

/// Anti-spam parameters for one guild.
///
/// Fields are private so a policy can only exist in a valid state: every field
/// is positive, the window is at most 28 days and the mute fits within the
/// platform limit. Deserialization goes
/// through the same validation, so a bad entry on disk is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpamPolicy")]
pub struct SpamPolicy {
    /// Messages allowed inside the window before the user is timed out
    limit: u32,
    /// Window length in seconds
    window: u64,
    /// Timeout length in seconds
    mute: u64,
}

/// Unvalidated shape of a policy as it appears in `antispam.json`.
#[derive(Debug, Deserialize)]
struct RawSpamPolicy {
    limit: u32,
    window: u64,
    mute: u64,
}

impl TryFrom<RawSpamPolicy> for SpamPolicy {
    type Error = String;

    fn try_from(raw: RawSpamPolicy) -> Result<Self, Self::Error> {
        SpamPolicy::new(raw.limit, raw.window, raw.mute)
    }
}

impl SpamPolicy {
    pub fn new(limit: u32, window: u64, mute: u64) -> Result<Self, String> {
        if limit == 0 {
            return Err("limit must be at least 1".to_string());
        }
        if window == 0 {
            return Err("window must be at least 1 second".to_string());
        }
        if window > MAX_WINDOW_SECS {
            return Err(format!(
                "window cannot exceed {} seconds (28 days)",
                MAX_WINDOW_SECS
            ));
        }
        if mute == 0 {
            return Err("mute must be at least 1 second".to_string());
        }
        if mute > MAX_MUTE_SECS {
            return Err(format!("mute cannot exceed {} seconds (28 days)", MAX_MUTE_SECS));
        }
        Ok(Self {
            limit,
            window,
            mute,
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> chrono::Duration {
        i64::try_from(self.window)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(MAX_WINDOW_SECS as i64))
    }

    pub fn window_secs(&self) -> u64 {
        self.window
    }

    pub fn mute(&self) -> Duration {
        Duration::from_secs(self.mute)
    }

    pub fn mute_secs(&self) -> u64 {
        self.mute
    }
}
