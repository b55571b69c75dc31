use crate::core::leveling::{LevelRecord, LevelStore, LevelingError};
use crate::infra::config::document::{load_object, typed_entries, write_document};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// On-disk shape of the ledger. XP and level live in two parallel maps:
/// { "xp": { user_id: xp }, "level": { user_id: level } }
#[derive(Debug, Serialize, Default)]
struct LevelDocument {
    xp: BTreeMap<u64, u64>,
    level: BTreeMap<u64, u32>,
}

impl LevelDocument {
    fn load(path: &Path) -> Self {
        let mut object = load_object(path);
        let mut section = |name: &str| match object.remove(name) {
            Some(Value::Object(map)) => map,
            Some(_) => {
                tracing::warn!(
                    path = %path.display(),
                    section = name,
                    "Ignoring malformed section"
                );
                Map::new()
            }
            None => Map::new(),
        };

        let xp = typed_entries(path, section("xp"));
        let level = typed_entries::<u32>(path, section("level"))
            .into_iter()
            .map(|(user_id, level)| (user_id, level.max(1)))
            .collect();

        Self { xp, level }
    }

    fn record(&self, user_id: u64) -> Option<LevelRecord> {
        let xp = self.xp.get(&user_id);
        let level = self.level.get(&user_id);
        if xp.is_none() && level.is_none() {
            return None;
        }
        let default = LevelRecord::default();
        Some(LevelRecord {
            xp: xp.copied().unwrap_or(default.xp),
            level: level.copied().unwrap_or(default.level),
        })
    }
}

/// JSON-backed ledger. Loaded once; every update rewrites the file.
pub struct JsonLevelStore {
    path: PathBuf,
    cache: RwLock<LevelDocument>,
}

impl JsonLevelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = LevelDocument::load(&path);

        tracing::info!(
            path = %path.display(),
            users = cache.level.len(),
            "Loaded level ledger"
        );

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    /// Write the ledger. Callers hold the write guard, so writes never overlap.
    fn persist(&self, document: &LevelDocument) -> Result<(), LevelingError> {
        write_document(&self.path, document)
            .map_err(|e| LevelingError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl LevelStore for JsonLevelStore {
    async fn get_record(&self, user_id: u64) -> Result<Option<LevelRecord>, LevelingError> {
        let cache = self.cache.read().await;
        Ok(cache.record(user_id))
    }

    async fn update_record<F>(
        &self,
        user_id: u64,
        update: F,
    ) -> Result<(LevelRecord, LevelRecord), LevelingError>
    where
        F: FnOnce(LevelRecord) -> LevelRecord + Send,
    {
        // Read, update and write all happen under one write guard.
        let mut cache = self.cache.write().await;
        let before = cache.record(user_id).unwrap_or_default();
        let after = update(before);
        cache.xp.insert(user_id, after.xp);
        cache.level.insert(user_id, after.level);
        self.persist(&cache)?;
        Ok((before, after))
    }

    async fn all_records(&self) -> Result<Vec<(u64, LevelRecord)>, LevelingError> {
        let cache = self.cache.read().await;
        let users: BTreeSet<u64> = cache
            .xp
            .keys()
            .chain(cache.level.keys())
            .copied()
            .collect();
        Ok(users
            .into_iter()
            .filter_map(|user_id| cache.record(user_id).map(|record| (user_id, record)))
            .collect())
    }
}
