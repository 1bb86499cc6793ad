//! Terminal User Interface module.
//!
//! This module renders the form and forwards user input to [`crate::app::App`]:
//! - Main event loop (`run`)
//! - Input handling for text fields, the engine selector and buttons
//! - Rendering for the form, the generated link, the toast and help overlay
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and paste handling
//! - `render` - Layout and render dispatch
//! - `form` - Form field, button and result widgets
//! - `status` - Notification toast and key-hint bar
//! - `help` - Keybinding overlay

mod form;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
