use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Key holding the active tab.
pub const TAB_STORAGE_KEY: &str = "active_tab";
/// Key holding the serialized conversation.
pub const CHAT_STORAGE_KEY: &str = "chat_history";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StorageName {
    File,
    Memory,
    None,
}

impl StorageName {
    pub fn parse(text: &str) -> Option<StorageName> {
        return StorageName::iter().find(|e| return e.to_string() == text);
    }
}

/// String key-value store that survives restarts, the same contract as a
/// browser's local storage.
#[async_trait]
pub trait Storage {
    /// Returns `None` when nothing has been stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}
