use super::BackendPrompt;

#[derive(Debug)]
pub enum Action {
    BackendRequest(BackendPrompt),
}
