#[cfg(test)]
#[path = "failure_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ReasoningMode;

static RETRY_IN: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?i)retry in (\d+(?:\.\d+)?)").unwrap());

const RATE_LIMIT_MARKERS: [&str; 3] = ["429", "RESOURCE_EXHAUSTED", "quota"];

/// Why a generation round trip produced no reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationFailure {
    RateLimited {
        mode: ReasoningMode,
        /// Whole seconds, rounded up from whatever the service suggested.
        retry_after: Option<u64>,
    },
    Unavailable,
}

impl GenerationFailure {
    pub fn classify(err: &anyhow::Error, mode: ReasoningMode) -> GenerationFailure {
        let message = format!("{err:#}");
        if !RATE_LIMIT_MARKERS
            .iter()
            .any(|marker| return message.contains(marker))
        {
            return GenerationFailure::Unavailable;
        }

        let retry_after = RETRY_IN
            .captures(&message)
            .and_then(|captures| return captures.get(1))
            .and_then(|seconds| return seconds.as_str().parse::<f64>().ok())
            .map(|seconds| return seconds.ceil() as u64);

        return GenerationFailure::RateLimited { mode, retry_after };
    }

    pub fn is_rate_limited(&self) -> bool {
        return matches!(self, GenerationFailure::RateLimited { .. });
    }

    /// User facing explanation of the failure.
    pub fn advisory(&self) -> String {
        match self {
            GenerationFailure::RateLimited { mode, retry_after } => {
                let retry_message = match retry_after {
                    Some(seconds) => format!("Please try again in {seconds} seconds."),
                    None => "Please wait a moment before trying again.".to_string(),
                };

                return format!(
                    "⚠️ Rate Limit Reached\n\nThe {} model has reached its API quota limit.\n\n{retry_message}\n\nTips:\n- Try switching to Standard mode (CTRL+T toggles Deep Reasoning)\n- Wait a minute between requests\n- The free tier has limited requests per minute/day",
                    mode.label()
                );
            }
            GenerationFailure::Unavailable => {
                return "Sorry, I encountered an error while processing your request. Please try again.".to_string();
            }
        }
    }
}
