#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;

use std::path;

use anyhow::Context;
use anyhow::Result;
use rust_embed::RustEmbed;
use tokio::fs;

use crate::domain::models::Profile;

const PROFILE_ASSET: &str = "profile.json";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub struct Profiles {}

impl Profiles {
    pub fn parse(payload: &str) -> Result<Profile> {
        return serde_json::from_str::<Profile>(payload).context("Profile is not valid JSON");
    }

    /// The profile compiled into the binary.
    pub fn embedded() -> Result<Profile> {
        let asset = Assets::get(PROFILE_ASSET).context("Embedded profile is missing")?;
        return Profiles::parse(&String::from_utf8_lossy(&asset.data));
    }

    /// Reads `profile_file` when set, otherwise falls back to the embedded
    /// profile.
    pub async fn load(profile_file: &str) -> Result<Profile> {
        if profile_file.is_empty() {
            return Profiles::embedded();
        }

        let file_path = path::PathBuf::from(profile_file);
        let payload = fs::read_to_string(&file_path)
            .await
            .with_context(|| return format!("Failed to read profile at {profile_file}"))?;

        tracing::debug!(path = profile_file, "profile loaded from file");
        return Profiles::parse(&payload);
    }
}
