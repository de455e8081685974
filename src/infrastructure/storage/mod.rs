pub mod file;
pub mod memory;
pub mod none;

use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Storage;
use crate::domain::models::StorageName;

pub type StorageBox = Arc<dyn Storage + Send + Sync>;

pub struct StorageManager {}

impl StorageManager {
    pub fn get(name: StorageName, dir: &str) -> Result<StorageBox> {
        if name == StorageName::File {
            if dir.is_empty() {
                bail!("File storage requires a storage directory");
            }
            return Ok(Arc::new(file::FileStorage::new(path::PathBuf::from(dir))));
        }

        if name == StorageName::Memory {
            return Ok(Arc::new(memory::MemoryStorage::default()));
        }

        if name == StorageName::None {
            return Ok(Arc::new(none::NoStorage::default()));
        }

        bail!(format!("No storage implemented for {name}"))
    }
}
