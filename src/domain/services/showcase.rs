#[cfg(test)]
#[path = "showcase_test.rs"]
mod tests;

use ratatui::prelude::Color;
use ratatui::prelude::Line;
use ratatui::prelude::Modifier;
use ratatui::prelude::Span;
use ratatui::prelude::Style;

use crate::domain::models::wrap_text;
use crate::domain::models::Profile;

fn heading(text: &str) -> Line<'static> {
    return Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ));
}

fn paragraph(lines: &mut Vec<Line<'static>>, text: &str, indent: usize, width: usize) {
    let pad = " ".repeat(indent);
    for text_line in wrap_text(text, width.saturating_sub(indent).max(10)) {
        lines.push(Line::from(format!("{pad}{text_line}")));
    }
}

fn muted(text: String) -> Span<'static> {
    return Span::styled(text, Style::default().fg(Color::DarkGray));
}

/// Builds the read-only résumé views.
pub struct Showcase {}

impl Showcase {
    pub fn about(profile: &Profile, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(
                profile.name.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(muted(profile.headline.to_string())),
            Line::from(""),
        ];

        paragraph(&mut lines, &profile.summary, 0, width);
        lines.push(Line::from(""));
        paragraph(&mut lines, &profile.contact, 0, width);
        lines.push(Line::from(""));

        lines.push(heading("Skills"));
        for category in &profile.skill_categories {
            lines.push(Line::from(Span::styled(
                category.name.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            paragraph(&mut lines, &category.skills.join(", "), 2, width);
        }
        lines.push(Line::from(""));

        lines.push(heading("Experience"));
        for experience in &profile.experiences {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} @ {}", experience.title, experience.company),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                muted(format!(" {} | {}", experience.period, experience.location)),
            ]));
            paragraph(&mut lines, &experience.description, 2, width);
            for responsibility in &experience.responsibilities {
                paragraph(&mut lines, &format!("- {responsibility}"), 2, width);
            }
            lines.push(Line::from(muted(format!(
                "  {} | {}",
                experience.kind,
                experience.technologies.join(", ")
            ))));
            lines.push(Line::from(""));
        }

        if !profile.education.is_empty() {
            lines.push(heading("Education"));
            paragraph(&mut lines, &profile.education, 0, width);
        }

        return lines;
    }

    pub fn projects(profile: &Profile, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines: Vec<Line<'static>> = vec![heading("Freelance Projects"), Line::from("")];

        for project in &profile.projects {
            lines.push(Line::from(vec![
                Span::styled(
                    project.name.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                muted(format!(" {} | {}", project.role, project.period)),
            ]));
            paragraph(&mut lines, &project.description, 2, width);
            lines.push(Line::from(muted(format!(
                "  {} | {}",
                project.kind,
                project.technologies.join(", ")
            ))));
            lines.push(Line::from(""));
        }

        return lines;
    }
}
