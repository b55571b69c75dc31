use super::document::{load_object, typed_entries, write_document};
use crate::core::store::{ConfigStore, StoreError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// JSON-file config store. The whole document is one object keyed by guild id:
/// { "guild_id": value }
///
/// Loaded once on construction; every write persists the entire document.
pub struct JsonConfigStore<V> {
    path: PathBuf,
    cache: RwLock<BTreeMap<u64, V>>,
}

impl<V> JsonConfigStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache: BTreeMap<u64, V> = typed_entries(&path, load_object(&path));

        tracing::info!(
            path = %path.display(),
            entries = cache.len(),
            "Loaded config document"
        );

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    /// Write the whole document. Callers hold the write guard, so writes to the
    /// temp file never overlap.
    fn persist(&self, cache: &BTreeMap<u64, V>) -> Result<(), StoreError> {
        write_document(&self.path, cache)?;
        Ok(())
    }
}

#[async_trait]
impl<V> ConfigStore<V> for JsonConfigStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn get(&self, guild_id: u64) -> Result<Option<V>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.get(&guild_id).cloned())
    }

    async fn put(&self, guild_id: u64, value: V) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        cache.insert(guild_id, value);
        self.persist(&cache)
    }

    async fn remove(&self, guild_id: u64) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        if cache.remove(&guild_id).is_none() {
            return Err(StoreError::NotFound);
        }

        self.persist(&cache)
    }

    async fn update<F, T>(&self, guild_id: u64, edit: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Option<V>) -> T + Send,
        T: Send,
    {
        let mut cache = self.cache.write().await;
        let mut slot = cache.remove(&guild_id);
        let out = edit(&mut slot);
        if let Some(value) = slot {
            cache.insert(guild_id, value);
        }

        self.persist(&cache)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::SpamPolicy;
    use crate::core::onboarding::WelcomeConfig;
    use crate::core::replies::QaTable;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_spam_policy_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("antispam.json");

        let policy = SpamPolicy::new(3, 10, 60).unwrap();
        let store = JsonConfigStore::new(path.clone());
        store.put(1234, policy).await.unwrap();

        // Reload from file
        let reloaded: JsonConfigStore<SpamPolicy> = JsonConfigStore::new(path.clone());
        assert_eq!(reloaded.get(1234).await.unwrap(), Some(policy));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"1234": {"limit": 3, "window": 10, "mute": 60}})
        );
    }

    #[tokio::test]
    async fn test_invalid_policies_are_skipped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("antispam.json");
        std::fs::write(
            &path,
            r#"{
                "1": {"limit": 5, "window": 10, "mute": 600},
                "2": {"limit": 0, "window": 10, "mute": 600},
                "3": {"limit": 5, "window": 10},
                "4": {"limit": 5, "window": 100000000000000000, "mute": 600}
            }"#,
        )
        .unwrap();

        let store: JsonConfigStore<SpamPolicy> = JsonConfigStore::new(path);
        assert!(store.get(1).await.unwrap().is_some());
        assert!(store.get(2).await.unwrap().is_none());
        assert!(store.get(3).await.unwrap().is_none());
        assert!(store.get(4).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_keep_every_edit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qa.json");
        let store: Arc<JsonConfigStore<QaTable>> = Arc::new(JsonConfigStore::new(path.clone()));

        let tasks: Vec<_> = (0..30)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .update(7, |slot| {
                            slot.get_or_insert_with(QaTable::new)
                                .insert(format!("q{}", i), format!("a{}", i));
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.get(7).await.unwrap().unwrap().len(), 30);
        let reloaded: JsonConfigStore<QaTable> = JsonConfigStore::new(path);
        assert_eq!(reloaded.get(7).await.unwrap().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_update_to_none_drops_the_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("join_dm.json");
        let store: JsonConfigStore<String> = JsonConfigStore::new(path.clone());
        store.put(3, "hi".to_string()).await.unwrap();

        let previous = store.update(3, |slot| slot.take()).await.unwrap();
        assert_eq!(previous.as_deref(), Some("hi"));

        let reloaded: JsonConfigStore<String> = JsonConfigStore::new(path);
        assert!(reloaded.get(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reads_documents_in_legacy_shape() {
        let dir = TempDir::new().unwrap();
        let welcome_path = dir.path().join("welcome_config.json");
        let dm_path = dir.path().join("join_dm.json");
        let qa_path = dir.path().join("qa.json");
        std::fs::write(
            &welcome_path,
            r#"{
                "42": {"channel": 99, "message": "Welcome {user}!"},
                "43": {"channel": 0, "message": "Nowhere {user}"}
            }"#,
        )
        .unwrap();
        std::fs::write(&dm_path, r#"{"42": "Hi {user}"}"#).unwrap();
        std::fs::write(&qa_path, r#"{"42": {"hi": "hello"}}"#).unwrap();

        let welcome: JsonConfigStore<WelcomeConfig> = JsonConfigStore::new(welcome_path);
        let dm: JsonConfigStore<String> = JsonConfigStore::new(dm_path);
        let qa: JsonConfigStore<QaTable> = JsonConfigStore::new(qa_path);

        assert_eq!(
            welcome.get(42).await.unwrap(),
            Some(WelcomeConfig {
                channel: 99,
                message: "Welcome {user}!".to_string(),
            })
        );
        assert_eq!(dm.get(42).await.unwrap().as_deref(), Some("Hi {user}"));
        assert!(welcome.get(43).await.unwrap().is_none());
        assert_eq!(
            qa.get(42).await.unwrap().and_then(|t| t.get("hi").cloned()),
            Some("hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_persists_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("join_dm.json");

        let store: JsonConfigStore<String> = JsonConfigStore::new(path.clone());
        store.put(1, "hello".to_string()).await.unwrap();
        store.remove(1).await.unwrap();
        assert!(matches!(store.remove(1).await, Err(StoreError::NotFound)));

        let reloaded: JsonConfigStore<String> = JsonConfigStore::new(path);
        assert!(reloaded.get(1).await.unwrap().is_none());
    }
}
