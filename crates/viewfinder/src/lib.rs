//! Desktop host for the viewfinder overlay: a gtk window that draws the
//! pie menu and focus ring with cairo and feeds them pointer input, focus
//! signals from a control socket and a hot-reloaded TOML config.

pub mod config;
pub mod events;
pub mod gui;
pub mod sys;
