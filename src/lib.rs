//! Terminal form that builds a search-engine link, or a parameterized link
//! against a custom base URL, then copies it or opens it in the browser.
//!
//! - [`builder`] turns the form fields into a URL
//! - [`notify`] owns the transient notification and copied-state timers
//! - [`app`] wires user actions to the builder, the clipboard and the browser
//! - [`ui`] is the terminal front end

pub mod app;
pub mod builder;
pub mod config;
pub mod keybindings;
pub mod notify;
pub mod platform;
pub mod theme;
pub mod ui;
pub mod util;
