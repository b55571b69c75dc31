// In-memory implementation of LevelStore.
//
// Used by the core leveling tests so they don't need a file on disk.

use crate::core::leveling::{LevelRecord, LevelStore, LevelingError};
use async_trait::async_trait;
use dashmap::DashMap;

/// **DashMap:**
/// A concurrent HashMap that's safe to use across multiple async tasks
/// without wrapping it in a Mutex.
pub struct InMemoryLevelStore {
    /// Maps user_id -> record
    data: DashMap<u64, LevelRecord>,
}

impl InMemoryLevelStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl Default for InMemoryLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LevelStore for InMemoryLevelStore {
    async fn get_record(&self, user_id: u64) -> Result<Option<LevelRecord>, LevelingError> {
        Ok(self.data.get(&user_id).map(|entry| *entry))
    }

    async fn update_record<F>(
        &self,
        user_id: u64,
        update: F,
    ) -> Result<(LevelRecord, LevelRecord), LevelingError>
    where
        F: FnOnce(LevelRecord) -> LevelRecord + Send,
    {
        // The entry guard holds the shard lock for the whole update.
        let mut entry = self.data.entry(user_id).or_default();
        let before = *entry;
        *entry = update(before);
        Ok((before, *entry))
    }

    async fn all_records(&self) -> Result<Vec<(u64, LevelRecord)>, LevelingError> {
        Ok(self
            .data
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryLevelStore::new();

        // Initially, the user is unknown
        assert!(store.get_record(123).await.unwrap().is_none());

        let record = LevelRecord { xp: 40, level: 3 };
        let (before, after) = store.update_record(123, |_| record).await.unwrap();
        assert_eq!(before, LevelRecord::default());
        assert_eq!(after, record);
        assert_eq!(store.get_record(123).await.unwrap(), Some(record));
        assert_eq!(store.all_records().await.unwrap(), vec![(123, record)]);
    }
}
