pub mod actions;
mod app_state;
mod conversation;
pub mod events;
mod navigation;
mod profiles;
mod scroll;
mod showcase;
mod transcript;

pub use app_state::*;
pub use conversation::*;
pub use navigation::*;
pub use profiles::*;
pub use scroll::*;
pub use showcase::*;
pub use transcript::*;
