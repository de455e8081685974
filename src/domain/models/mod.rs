mod action;
mod backend;
mod event;
mod failure;
mod loading;
mod location;
mod message;
mod profile;
mod role;
mod storage;
mod tab;
mod textarea;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use failure::*;
pub use loading::*;
pub use location::*;
pub use message::*;
pub use profile::*;
pub use role::*;
pub use storage::*;
pub use tab::*;
pub use textarea::*;
