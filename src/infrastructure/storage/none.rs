use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Storage;

/// Stands in when storage is unavailable: reads find nothing and writes are
/// dropped.
#[derive(Default)]
pub struct NoStorage {}

#[async_trait]
impl Storage for NoStorage {
    async fn get_item(&self, _key: &str) -> Result<Option<String>> {
        return Ok(None);
    }

    async fn set_item(&self, key: &str, _value: &str) -> Result<()> {
        tracing::debug!(key = key, "storage disabled, dropping write");
        return Ok(());
    }
}
