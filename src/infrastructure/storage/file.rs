#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Storage;

/// Stores every key as its own file inside `dir`.
pub struct FileStorage {
    pub dir: path::PathBuf,
}

impl FileStorage {
    pub fn new(dir: path::PathBuf) -> FileStorage {
        return FileStorage { dir };
    }

    fn get_file_path(&self, key: &str) -> Result<path::PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| return c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!(format!("Invalid storage key '{key}'"));
        }

        return Ok(self.dir.join(key));
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.get_file_path(key)?;
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        return Ok(Some(payload));
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.get_file_path(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
        }

        // Temp file + rename keeps the write atomic.
        let tmp_path = self.dir.join(format!(".{key}.tmp"));
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        fs::rename(tmp_path, file_path).await?;

        tracing::debug!(key = key, bytes = value.len(), "stored item");
        return Ok(());
    }
}
