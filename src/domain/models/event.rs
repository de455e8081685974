use tui_textarea::Input;

use super::GenerationFailure;
use super::Tab;

#[derive(Debug)]
pub enum Event {
    BackendFailure(GenerationFailure),
    BackendResponse(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardPaste(String),
    SendRequested(String),
    SuggestionPicked(usize),
    TabNext(),
    TabPrevious(),
    TabSelected(Tab),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
}
