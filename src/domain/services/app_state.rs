#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Line;
use tokio::sync::mpsc;

use super::Conversation;
use super::Navigation;
use super::Scroll;
use super::Settlement;
use super::Showcase;
use super::Speakers;
use super::Transcript;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Profile;
use crate::domain::models::ReasoningMode;
use crate::domain::models::Tab;
use crate::domain::models::TextArea;

pub struct AppState<'a> {
    pub navigation: Navigation,
    pub conversation: Conversation,
    pub profile: Profile,
    pub speakers: Speakers,
    pub textarea: tui_textarea::TextArea<'a>,
    pub mode: ReasoningMode,
    pub scroll: Scroll,
    pub last_known_height: u16,
    pub last_known_width: u16,
    /// Set when the backend failed its start-up health check.
    pub backend_warning: Option<String>,
}

impl<'a> AppState<'a> {
    pub fn new(
        navigation: Navigation,
        conversation: Conversation,
        profile: Profile,
        speakers: Speakers,
    ) -> AppState<'a> {
        return AppState {
            navigation,
            conversation,
            profile,
            speakers,
            textarea: TextArea::new(ReasoningMode::Standard),
            mode: ReasoningMode::Standard,
            scroll: Scroll::default(),
            last_known_height: 0,
            last_known_width: 0,
            backend_warning: None,
        };
    }

    /// Lines for the active tab at the given width.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        match self.navigation.selected() {
            Tab::About => return Showcase::about(&self.profile, width),
            Tab::Projects => return Showcase::projects(&self.profile, width),
            Tab::Chat => {
                return Transcript::lines(
                    self.conversation.messages(),
                    self.conversation.advisory(),
                    &self.profile.suggested_questions,
                    &self.speakers,
                    width,
                );
            }
        }
    }

    /// Records the viewport and clamps scrolling to the current content.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.last_known_width = width;
        self.last_known_height = height;

        let length = self.lines(width).len() as u16;
        self.scroll.set_state(length, height);
    }

    fn can_type(&self) -> bool {
        return self.navigation.selected() == Tab::Chat && !self.conversation.is_waiting();
    }

    async fn select_tab(&mut self, tab: Tab) {
        self.navigation.select(tab).await;
        self.scroll.top();
    }

    fn follow_transcript(&mut self) {
        self.set_viewport(self.last_known_width, self.last_known_height);
        self.scroll.last();
    }

    /// Applies one event. Returns `true` when the app should exit.
    pub async fn handle_event(
        &mut self,
        event: Event,
        actions: &mpsc::UnboundedSender<Action>,
        mailbox: &mpsc::UnboundedSender<Event>,
    ) -> Result<bool> {
        match event {
            Event::KeyboardCTRLC() => {
                return Ok(true);
            }
            Event::KeyboardCTRLL() => {
                self.conversation.clear().await;
                self.scroll.top();
            }
            Event::KeyboardCTRLT() => {
                self.mode = ReasoningMode::from_deep(!self.mode.is_deep());
                TextArea::retitle(&mut self.textarea, self.mode);
                tracing::debug!(mode = self.mode.label(), "reasoning mode toggled");
            }
            Event::KeyboardEnter() => {
                if self.can_type() {
                    mailbox.send(Event::SendRequested(self.textarea.lines().join("\n")))?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if self.can_type() {
                    self.textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if self.can_type() {
                    self.textarea.insert_str(text);
                }
            }
            Event::SuggestionPicked(idx) => {
                if let Some(question) = self.profile.suggested_questions.get(idx).cloned() {
                    if self.navigation.selected() != Tab::Chat {
                        self.select_tab(Tab::Chat).await;
                    }
                    mailbox.send(Event::SendRequested(question))?;
                }
            }
            Event::SendRequested(text) => {
                if let Some(prompt) = self.conversation.send(&text, self.mode).await {
                    self.textarea = TextArea::new(self.mode);
                    actions.send(Action::BackendRequest(prompt))?;
                    self.follow_transcript();
                }
            }
            Event::BackendResponse(text) => {
                if let Settlement::Replied(_) = self.conversation.settle(Ok(text)).await {
                    self.follow_transcript();
                }
            }
            Event::BackendFailure(failure) => {
                if let Settlement::Failed(_) = self.conversation.settle(Err(failure)).await {
                    self.follow_transcript();
                }
            }
            Event::TabNext() => {
                self.navigation.next().await;
                self.scroll.top();
            }
            Event::TabPrevious() => {
                self.navigation.previous().await;
                self.scroll.top();
            }
            Event::TabSelected(tab) => {
                self.select_tab(tab).await;
            }
            Event::UIScrollDown() => {
                self.scroll.down();
            }
            Event::UIScrollUp() => {
                self.scroll.up();
            }
            Event::UIScrollPageDown() => {
                self.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                self.scroll.up_page();
            }
            Event::UITick() => {}
        }

        return Ok(false);
    }
}
