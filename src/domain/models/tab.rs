#[cfg(test)]
#[path = "tab_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Top level views of the portfolio, in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    About,
    Projects,
    Chat,
}

impl Tab {
    pub fn parse(text: &str) -> Option<Tab> {
        return Tab::iter().find(|e| return e.to_string() == text);
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::About => return "About",
            Tab::Projects => return "Projects",
            Tab::Chat => return "Chat",
        }
    }

    pub fn index(&self) -> usize {
        return Tab::iter().position(|e| return e == *self).unwrap_or(0);
    }

    pub fn next(&self) -> Tab {
        let tabs = Tab::iter().collect::<Vec<Tab>>();
        return tabs[(self.index() + 1) % tabs.len()];
    }

    pub fn previous(&self) -> Tab {
        let tabs = Tab::iter().collect::<Vec<Tab>>();
        return tabs[(self.index() + tabs.len() - 1) % tabs.len()];
    }
}
