//! Terminal text helpers.
//!
//! - **Display width**: Unicode-aware column counting for layout
//! - **Sanitizing**: stripping escape sequences from typed or pasted input
//! - **Fitting**: truncating or tail-clipping text to a column budget

mod text;

pub use text::{
    display_width, sanitize_field_input, strip_control_chars, tail_to_width, truncate_to_width,
};
