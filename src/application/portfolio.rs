use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Profile;
use crate::domain::models::StorageName;
use crate::domain::services::Conversation;
use crate::domain::services::Navigation;
use crate::domain::services::Profiles;
use crate::domain::services::Speakers;
use crate::infrastructure::address_bar::AddressBar;
use crate::infrastructure::storage::StorageBox;
use crate::infrastructure::storage::StorageManager;

/// Everything loaded from configuration that the UI and command line share.
pub struct Portfolio {
    pub profile: Profile,
    pub storage: StorageBox,
    pub system_instruction: String,
}

impl Portfolio {
    pub async fn from_config() -> Result<Portfolio> {
        let profile = Profiles::load(&Config::get(ConfigKey::ProfileFile)).await?;
        if Config::get(ConfigKey::AssistantName).is_empty() {
            Config::set(ConfigKey::AssistantName, &profile.assistant_name);
        }

        let storage_name = Config::get(ConfigKey::Storage);
        let Some(storage_kind) = StorageName::parse(&storage_name) else {
            bail!(format!("Unknown storage '{storage_name}'"));
        };
        let storage = StorageManager::get(storage_kind, &Config::get(ConfigKey::StorageDir))?;
        let system_instruction = profile.system_instruction()?;

        return Ok(Portfolio {
            profile,
            storage,
            system_instruction,
        });
    }

    pub async fn conversation(&self) -> Conversation {
        return Conversation::load(
            self.storage.clone(),
            &self.profile.welcome_text(),
            &self.system_instruction,
        )
        .await;
    }

    pub async fn navigation(&self) -> Result<Navigation> {
        let address = AddressBar::parse(&Config::get(ConfigKey::Url))?;
        return Ok(Navigation::start(self.storage.clone(), Box::new(address)).await);
    }

    pub fn speakers(&self) -> Speakers {
        return Speakers {
            user: Config::get(ConfigKey::Username),
            assistant: Config::get(ConfigKey::AssistantName),
        };
    }
}
