#[cfg(test)]
#[path = "address_bar_test.rs"]
mod tests;

use anyhow::Result;
use reqwest::Url;

use crate::domain::models::Location;

pub const DEFAULT_ADDRESS: &str = "devfolio://portfolio/";

/// In-memory address of the running app, rewritten in place the way
/// `history.replaceState` rewrites a browser URL.
pub struct AddressBar {
    url: Url,
}

impl AddressBar {
    pub fn parse(address: &str) -> Result<AddressBar> {
        let mut raw = address.trim();
        if raw.is_empty() {
            raw = DEFAULT_ADDRESS;
        }

        return Ok(AddressBar {
            url: Url::parse(raw)?,
        });
    }
}

impl Location for AddressBar {
    fn query_param(&self, name: &str) -> Option<String> {
        return self
            .url
            .query_pairs()
            .find(|(key, _)| return key == name)
            .map(|(_, value)| return value.to_string());
    }

    fn replace_query_param(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        let mut pairs: Vec<(String, String)> = vec![];
        for (key, existing) in self.url.query_pairs() {
            if key != name {
                pairs.push((key.to_string(), existing.to_string()));
                continue;
            }
            if !replaced {
                pairs.push((key.to_string(), value.to_string()));
                replaced = true;
            }
        }
        if !replaced {
            pairs.push((name.to_string(), value.to_string()));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    fn href(&self) -> String {
        return self.url.to_string();
    }
}
