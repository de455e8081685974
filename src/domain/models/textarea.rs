use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

use super::ReasoningMode;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn new(mode: ReasoningMode) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(TextArea::block(mode));

        return textarea;
    }

    /// Keeps typed text while swapping the title for the given mode.
    pub fn retitle(textarea: &mut tui_textarea::TextArea<'a>, mode: ReasoningMode) {
        textarea.set_block(TextArea::block(mode));
    }

    fn block(mode: ReasoningMode) -> Block<'a> {
        let mut title = "Type a message... (Standard)";
        if mode.is_deep() {
            title = "Ask a complex engineering question... (Deep Reasoning)";
        }

        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }
}
