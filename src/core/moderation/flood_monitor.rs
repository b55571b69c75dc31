// Sliding-window message counter, one log per (guild, user).
//
// The logs live only in memory: they start empty when the process starts and
// are dropped the moment a violation fires. Timestamps come from the message
// itself, never from the clock at evaluation time. A user with an empty log has
// no entry in the map.

use super::moderation_models::SpamPolicy;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::VecDeque;

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
struct GuildUserKey {
    guild_id: u64,
    user_id: u64,
}

pub struct FloodMonitor {
    logs: DashMap<GuildUserKey, VecDeque<DateTime<Utc>>>,
}

impl FloodMonitor {
    pub fn new() -> Self {
        Self {
            logs: DashMap::new(),
        }
    }

    /// Record one message and report whether the user crossed the limit.
    ///
    /// Entries older than the window (relative to `at`) are pruned first; the
    /// age check is inclusive, so an entry exactly `window` seconds old still
    /// counts. On a violation the user's log is dropped so the next window
    /// starts fresh.
    pub fn record(
        &self,
        guild_id: u64,
        user_id: u64,
        at: DateTime<Utc>,
        policy: &SpamPolicy,
    ) -> bool {
        let key = GuildUserKey { guild_id, user_id };
        let window = policy.window();

        let violated = {
            let mut log = self.logs.entry(key).or_default();
            log.push_back(at);
            log.retain(|seen| at.signed_duration_since(*seen) <= window);

            let violated = log.len() >= policy.limit() as usize;
            if violated {
                log.clear();
            }
            violated
        };

        // The entry guard is released above; removing while holding it would
        // deadlock on the shard. A message recorded in between keeps the entry.
        if violated {
            self.logs.remove_if(&key, |_, log| log.is_empty());
        }
        violated
    }

    /// How many messages are currently counted against a user.
    #[cfg(test)]
    pub fn pending(&self, guild_id: u64, user_id: u64) -> usize {
        self.logs
            .get(&GuildUserKey { guild_id, user_id })
            .map(|log| log.len())
            .unwrap_or(0)
    }

    /// Drop every log for a guild (used when its policy is removed).
    pub fn forget_guild(&self, guild_id: u64) {
        self.logs.retain(|key, _| key.guild_id != guild_id);
    }
}

impl Default for FloodMonitor {
    fn default() -> Self {
        Self::new()
    }
}
