// In-memory implementation of ConfigStore.
//
// Nothing is persisted; it backs the core service tests so they run without
// touching the filesystem.

use crate::core::store::{ConfigStore, StoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

pub struct InMemoryConfigStore<V> {
    data: DashMap<u64, V>,
}

impl<V> InMemoryConfigStore<V> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl<V> Default for InMemoryConfigStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> ConfigStore<V> for InMemoryConfigStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, guild_id: u64) -> Result<Option<V>, StoreError> {
        Ok(self.data.get(&guild_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, guild_id: u64, value: V) -> Result<(), StoreError> {
        self.data.insert(guild_id, value);
        Ok(())
    }

    async fn remove(&self, guild_id: u64) -> Result<(), StoreError> {
        self.data
            .remove(&guild_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn update<F, T>(&self, guild_id: u64, edit: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Option<V>) -> T + Send,
        T: Send,
    {
        // The entry holds its shard lock until it goes out of scope.
        let out = match self.data.entry(guild_id) {
            Entry::Occupied(mut occupied) => {
                let mut slot = Some(occupied.get().clone());
                let out = edit(&mut slot);
                match slot {
                    Some(value) => {
                        occupied.insert(value);
                    }
                    None => {
                        occupied.remove();
                    }
                }
                out
            }
            Entry::Vacant(vacant) => {
                let mut slot = None;
                let out = edit(&mut slot);
                if let Some(value) = slot {
                    vacant.insert(value);
                }
                out
            }
        };
        Ok(out)
    }
}
