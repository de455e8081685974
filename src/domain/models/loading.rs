use ratatui::prelude::Alignment;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::ReasoningMode;

pub struct Loading {
    mode: ReasoningMode,
}

impl Loading {
    pub fn new(mode: ReasoningMode) -> Loading {
        return Loading { mode };
    }

    pub fn text(&self) -> &'static str {
        if self.mode.is_deep() {
            return "Thinking deeply...";
        }
        return "Waiting for response...";
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.text())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
