pub mod cli;
mod portfolio;
pub mod ui;
