//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use crate::notify::NotificationKind;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Form --
    pub title: Style,
    pub subtitle: Style,
    pub field_border: Style,
    pub field_border_focused: Style,
    pub field_text: Style,
    pub field_placeholder: Style,

    // -- Buttons --
    pub button_generate: Style,
    pub button_search: Style,
    pub button_focused: Style,

    // -- Result panel --
    pub result_url: Style,
    pub copy_idle: Style,
    pub copy_done: Style,

    // -- Notifications --
    pub notify_success: Style,
    pub notify_error: Style,
    pub notify_info: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub help_heading: Style,
    pub help_body: Style,
    pub help_hint: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            // Form
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray),
            field_border: Style::default().fg(Color::DarkGray),
            field_border_focused: Style::default().fg(Color::Cyan),
            field_text: Style::default().fg(Color::White),
            field_placeholder: Style::default().fg(Color::DarkGray),

            // Buttons
            button_generate: Style::default().bg(Color::Blue).fg(Color::White),
            button_search: Style::default().bg(Color::Green).fg(Color::Black),
            button_focused: Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            // Result
            result_url: Style::default().fg(Color::Yellow),
            copy_idle: Style::default().bg(Color::DarkGray).fg(Color::White),
            copy_done: Style::default().bg(Color::Green).fg(Color::Black),

            // Notifications
            notify_success: Style::default().bg(Color::Green).fg(Color::Black),
            notify_error: Style::default().bg(Color::Red).fg(Color::White),
            notify_info: Style::default().bg(Color::Blue).fg(Color::White),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default(),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            // Form
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::DarkGray),
            field_border: Style::default().fg(Color::Gray),
            field_border_focused: Style::default().fg(Color::Blue),
            field_text: Style::default().fg(Color::Black),
            field_placeholder: Style::default().fg(Color::Gray),

            // Buttons
            button_generate: Style::default().bg(Color::Blue).fg(Color::White),
            button_search: Style::default().bg(Color::Green).fg(Color::White),
            button_focused: Style::default()
                .bg(Color::Black)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            // Result
            result_url: Style::default().fg(Color::Magenta),
            copy_idle: Style::default().bg(Color::Gray).fg(Color::Black),
            copy_done: Style::default().bg(Color::Green).fg(Color::White),

            // Notifications
            notify_success: Style::default().bg(Color::Green).fg(Color::White),
            notify_error: Style::default().bg(Color::Red).fg(Color::White),
            notify_info: Style::default().bg(Color::Blue).fg(Color::White),

            // Chrome
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default().fg(Color::Black),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 20] = [
    "title",
    "subtitle",
    "field_border",
    "field_border_focused",
    "field_text",
    "field_placeholder",
    "button_generate",
    "button_search",
    "button_focused",
    "result_url",
    "copy_idle",
    "copy_done",
    "notify_success",
    "notify_error",
    "notify_info",
    "status_bar",
    "help_heading",
    "help_body",
    "help_hint",
    "panel_border",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 20] = [
            p.title,
            p.subtitle,
            p.field_border,
            p.field_border_focused,
            p.field_text,
            p.field_placeholder,
            p.button_generate,
            p.button_search,
            p.button_focused,
            p.result_url,
            p.copy_idle,
            p.copy_done,
            p.notify_success,
            p.notify_error,
            p.notify_info,
            p.status_bar,
            p.help_heading,
            p.help_body,
            p.help_hint,
            // Panel borders share the unfocused field border
            p.field_border,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

/// Role name for a notification toast of the given kind.
pub fn notification_role(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "notify_success",
        NotificationKind::Error => "notify_error",
        NotificationKind::Info => "notify_info",
    }
}

// ============================================================================
// Tests
// ============================================================================
