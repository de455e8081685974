#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;

use crate::domain::models::Location;
use crate::domain::models::Tab;
use crate::domain::models::TAB_STORAGE_KEY;
use crate::infrastructure::storage::StorageBox;

pub const TAB_QUERY_PARAM: &str = "tab";

pub type LocationBox = Box<dyn Location + Send + Sync>;

/// Owns the active tab and keeps the address and storage in step with it.
pub struct Navigation {
    selected: Tab,
    storage: StorageBox,
    location: LocationBox,
}

/// Picks the tab to open with. The address wins over storage, and anything
/// unrecognised falls through to the default.
pub async fn resolve_initial_selection(storage: &StorageBox, location: &dyn Location) -> Tab {
    if let Some(tab) = location
        .query_param(TAB_QUERY_PARAM)
        .and_then(|value| return Tab::parse(&value))
    {
        tracing::debug!(tab = %tab, "tab resolved from address");
        return tab;
    }

    match storage.get_item(TAB_STORAGE_KEY).await {
        Ok(Some(value)) => {
            if let Some(tab) = Tab::parse(&value) {
                tracing::debug!(tab = %tab, "tab resolved from storage");
                return tab;
            }
            tracing::warn!(value = %value, "ignoring unknown stored tab");
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = ?err, "failed to read stored tab");
        }
    }

    return Tab::default();
}

impl Navigation {
    pub async fn start(storage: StorageBox, location: LocationBox) -> Navigation {
        let selected = resolve_initial_selection(&storage, location.as_ref()).await;
        let mut navigation = Navigation {
            selected,
            storage,
            location,
        };
        navigation.sync().await;

        return navigation;
    }

    pub fn selected(&self) -> Tab {
        return self.selected;
    }

    pub fn href(&self) -> String {
        return self.location.href();
    }

    pub async fn select(&mut self, tab: Tab) {
        self.selected = tab;
        self.sync().await;
    }

    pub async fn next(&mut self) {
        self.select(self.selected.next()).await;
    }

    pub async fn previous(&mut self) {
        self.select(self.selected.previous()).await;
    }

    async fn sync(&mut self) {
        let value = self.selected.to_string();
        if let Err(err) = self.storage.set_item(TAB_STORAGE_KEY, &value).await {
            tracing::warn!(error = ?err, tab = %value, "failed to persist tab");
        }

        self.location.replace_query_param(TAB_QUERY_PARAM, &value);
    }
}
