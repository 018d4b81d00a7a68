//! In-memory preference store — the default backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::prefs::PreferenceRecord;
use crate::store::traits::PreferenceStore;

/// Map-backed store, suitable for a single process.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, PreferenceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records. Test helper.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<PreferenceRecord>, StoreError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn set(&self, user_id: &str, record: PreferenceRecord) -> Result<(), StoreError> {
        debug!(user_id, "Storing preference record");
        self.records
            .write()
            .await
            .insert(user_id.to_string(), record);
        Ok(())
    }
}
