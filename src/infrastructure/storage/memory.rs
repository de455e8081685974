use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::Storage;

/// Process local storage. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.items.get(key).map(|value| return value.to_string()));
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        return Ok(());
    }
}
