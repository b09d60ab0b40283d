//! Interactive split-screen viewer
//!
//! - `layout`: pane geometry, pagination and the grid redraw
//! - `sink`: the character-cell surface drawn onto
//! - `ui`: drawing helpers and the help screen
//! - `command`: key bindings
//! - `app`: state and event dispatch
//! - `viewer`: terminal setup and the event loop

pub mod app;
pub mod command;
pub mod layout;
pub mod sink;
pub mod theme;
pub mod ui;

#[allow(clippy::module_inception)]
pub mod viewer;

#[cfg(test)]
mod tests;
