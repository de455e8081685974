#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

/// Reserved identifier of the synthetic greeting that opens every fresh
/// conversation.
pub const WELCOME_ID: &str = "welcome";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    #[serde(
        rename = "isThinking",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deep_reasoning: Option<bool>,
    #[serde(with = "timestamp_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn welcome(text: &str) -> Message {
        return Message {
            id: WELCOME_ID.to_string(),
            role: Role::Assistant,
            text: text.to_string(),
            deep_reasoning: None,
            timestamp: Utc::now(),
        };
    }

    pub fn user(id: String, text: &str) -> Message {
        return Message {
            id,
            role: Role::User,
            text: text.to_string(),
            deep_reasoning: None,
            timestamp: Utc::now(),
        };
    }

    pub fn assistant(id: String, text: &str, deep_reasoning: bool) -> Message {
        return Message {
            id,
            role: Role::Assistant,
            text: text.to_string(),
            deep_reasoning: Some(deep_reasoning),
            timestamp: Utc::now(),
        };
    }

    pub fn is_welcome(&self) -> bool {
        return self.id == WELCOME_ID;
    }

    pub fn is_deep_reasoning(&self) -> bool {
        return self.role == Role::Assistant && self.deep_reasoning.unwrap_or(false);
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        return wrap_text(&self.text, line_max_width);
    }
}

/// Word wraps `text` to fit within `line_max_width` columns. Words longer
/// than the width keep a line of their own, and blank lines are kept.
pub fn wrap_text(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for full_line in text.replace('\t', "  ").split('\n') {
        if full_line.trim().is_empty() {
            lines.push(" ".to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_lines: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            let word_len = word.chars().count();
            if !current_lines.is_empty() && word_len + char_count + 1 > line_max_width {
                lines.push(current_lines.join(" ").trim_end().to_string());
                current_lines = vec![word];
                char_count = word_len + 1;
            } else {
                current_lines.push(word);
                char_count += word_len + 1;
            }
        }
        if !current_lines.is_empty() {
            lines.push(current_lines.join(" ").trim_end().to_string());
        }
    }

    return lines;
}

/// Hands out message identifiers derived from the millisecond clock. Ids are
/// strictly increasing even when several messages are created within the same
/// millisecond.
#[derive(Default, Debug)]
pub struct MessageIds {
    last: i64,
}

impl MessageIds {
    /// Seeds the generator so new ids sort after every numeric id in
    /// `messages`.
    pub fn seeded(messages: &[Message]) -> MessageIds {
        let last = messages
            .iter()
            .filter_map(|message| return message.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        return MessageIds { last };
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last.saturating_add(1));

        return self.last.to_string();
    }
}

mod timestamp_millis {
    use chrono::DateTime;
    use chrono::SecondsFormat;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;

        return Ok(parsed.with_timezone(&Utc));
    }
}
