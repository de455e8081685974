#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use chrono::Local;
use ratatui::prelude::Color;
use ratatui::prelude::Line;
use ratatui::prelude::Modifier;
use ratatui::prelude::Span;
use ratatui::prelude::Style;

use crate::domain::models::wrap_text;
use crate::domain::models::Message;
use crate::domain::models::Role;

/// Display names used for each side of the conversation.
pub struct Speakers {
    pub user: String,
    pub assistant: String,
}

pub struct Transcript {}

fn header(message: &Message, speakers: &Speakers) -> Line<'static> {
    let (name, color) = match message.role {
        Role::User => (speakers.user.to_string(), Color::Green),
        Role::Assistant => (speakers.assistant.to_string(), Color::Cyan),
    };

    let mut spans = vec![
        Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {}", message.timestamp.with_timezone(&Local).format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if message.is_deep_reasoning() {
        spans.push(Span::styled(
            " Deep Reasoning",
            Style::default().fg(Color::Magenta),
        ));
    }

    return Line::from(spans);
}

impl Transcript {
    /// Renders the messages, then the advisory and suggested questions, as
    /// lines no wider than `width`.
    pub fn lines(
        messages: &[Message],
        advisory: Option<&str>,
        suggestions: &[String],
        speakers: &Speakers,
        width: u16,
    ) -> Vec<Line<'static>> {
        let text_width = (width as usize).saturating_sub(2).max(10);
        let mut lines: Vec<Line<'static>> = vec![];

        for message in messages {
            lines.push(header(message, speakers));
            for text_line in message.as_string_lines(text_width) {
                lines.push(Line::from(format!("  {text_line}")));
            }
            lines.push(Line::from(""));
        }

        if let Some(advisory_text) = advisory {
            for text_line in wrap_text(advisory_text, text_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {text_line}"),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(""));
        }

        if !suggestions.is_empty() {
            lines.push(Line::from(Span::styled(
                "Suggested questions",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (idx, question) in suggestions.iter().enumerate().take(9) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  Alt+{} ", idx + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(question.to_string()),
                ]));
            }
        }

        return lines;
    }
}
