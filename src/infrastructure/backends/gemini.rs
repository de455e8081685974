#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::header::RETRY_AFTER;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ReasoningMode;
use crate::domain::models::Role;

pub const EMPTY_REPLY: &str =
    "I apologize, but I couldn't generate a text response at this moment.";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

fn text_content(role: Option<&str>, text: &str) -> Content {
    return Content {
        role: role.map(|r| return r.to_string()),
        parts: vec![Part {
            text: text.to_string(),
            thought: None,
        }],
    };
}

fn retry_after_hint(headers: &HeaderMap) -> Option<u64> {
    return headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok();
}

pub struct Gemini {
    url: String,
    token: String,
    model: String,
    deep_model: String,
    thinking_budget: u32,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            model: Config::get(ConfigKey::Model),
            deep_model: Config::get(ConfigKey::DeepModel),
            thinking_budget: Config::get(ConfigKey::ThinkingBudget)
                .parse::<u32>()
                .unwrap_or(32768),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl Gemini {
    fn model_for(&self, mode: ReasoningMode) -> &str {
        if mode.is_deep() {
            return &self.deep_model;
        }
        return &self.model;
    }

    fn build_request(&self, prompt: BackendPrompt) -> GenerateContentRequest {
        let mut contents: Vec<Content> = prompt
            .history
            .iter()
            .map(|entry| return text_content(Some(entry.role.wire_name()), &entry.text))
            .collect();
        contents.push(text_content(Some(Role::User.wire_name()), &prompt.text));

        let mut system_instruction = None;
        if !prompt.system_instruction.is_empty() {
            system_instruction = Some(text_content(None, &prompt.system_instruction));
        }

        let mut generation_config = None;
        if prompt.mode.is_deep() {
            generation_config = Some(GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            });
        }

        return GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        };
    }
}

#[async_trait]
impl Backend for Gemini {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, "Gemini is not reachable");
                bail!("Gemini is not reachable");
            }
        };
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, prompt: BackendPrompt) -> Result<String> {
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let mode = prompt.mode;
        let model = self.model_for(mode).to_string();
        let req = self.build_request(prompt);

        tracing::debug!(
            model = %model,
            mode = mode.label(),
            turns = req.contents.len(),
            "requesting Gemini completion"
        );

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let retry_after = retry_after_hint(res.headers());
            let mut body = res.text().await.unwrap_or_default();
            if let Some(seconds) = retry_after {
                if !body.to_lowercase().contains("retry in") {
                    body = format!("{body} Please retry in {seconds}s.");
                }
            }

            tracing::error!(
                status = status.as_u16(),
                model = %model,
                "Failed to make completion request to Gemini"
            );
            bail!(format!(
                "Failed to make completion request to Gemini, {}: {}",
                status.as_u16(),
                body.trim()
            ));
        }

        let ores = res.json::<GenerateContentResponse>().await?;
        let text = ores
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| return candidate.content)
            .map(|content| {
                return content
                    .parts
                    .into_iter()
                    .filter(|part| return !part.thought.unwrap_or(false))
                    .map(|part| return part.text)
                    .collect::<Vec<String>>()
                    .join("");
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::warn!(model = %model, "Gemini returned no text");
            return Ok(EMPTY_REPLY.to_string());
        }

        return Ok(text);
    }
}
