//! Keybinding registry — maps actions to key events with config overrides.
//!
//! Text fields receive every key that is not bound, so global bindings use
//! Ctrl combos, function keys and navigation keys only.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NextField,
    PrevField,
    Generate,
    Search,
    Copy,
    CycleEngine,
    Activate,
    ClearField,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NextField => "Focus next field",
            Self::PrevField => "Focus previous field",
            Self::Generate => "Generate link",
            Self::Search => "Open search in browser",
            Self::Copy => "Copy generated link",
            Self::CycleEngine => "Switch search engine",
            Self::Activate => "Press focused button",
            Self::ClearField => "Clear focused field",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }

    /// Short label for the key-hint bar.
    pub fn hint_label(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::NextField => "next",
            Self::PrevField => "prev",
            Self::Generate => "generate",
            Self::Search => "search",
            Self::Copy => "copy",
            Self::CycleEngine => "engine",
            Self::Activate => "press",
            Self::ClearField => "clear",
            Self::CycleTheme => "theme",
            Self::ShowHelp => "help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — follows the focused form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Engine,
    SearchTerm,
    BaseUrl,
    Button,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Drop SHIFT where the key code already carries it ('G', BackTab).
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Backspace"
/// - Modifier combos: "Ctrl+g", "Ctrl+y"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.chars().count() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "backtab" | "shift+tab" => return Some(KeySpec::plain(KeyCode::BackTab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if s.starts_with('F') || s.starts_with('f') {
        if let Ok(n) = s[1..].parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    if s.chars().count() == 1 {
        let c = s.chars().next()?;
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// try the focused context first and fall back to Global.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        // === Global ===
        self.bind(Context::Global, KeySpec::plain(KeyCode::Esc), Action::Quit);
        self.bind(Context::Global, KeySpec::ctrl('c'), Action::Quit);

        self.bind(Context::Global, KeySpec::plain(KeyCode::Tab), Action::NextField);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Down), Action::NextField);
        self.bind(
            Context::Global,
            KeySpec::plain(KeyCode::BackTab),
            Action::PrevField,
        );
        self.bind(Context::Global, KeySpec::plain(KeyCode::Up), Action::PrevField);

        self.bind(Context::Global, KeySpec::ctrl('g'), Action::Generate);
        self.bind(Context::Global, KeySpec::ctrl('o'), Action::Search);
        self.bind(Context::Global, KeySpec::ctrl('y'), Action::Copy);
        self.bind(Context::Global, KeySpec::ctrl('e'), Action::CycleEngine);
        self.bind(Context::Global, KeySpec::ctrl('u'), Action::ClearField);
        self.bind(Context::Global, KeySpec::ctrl('t'), Action::CycleTheme);
        self.bind(Context::Global, KeySpec::plain(KeyCode::F(1)), Action::ShowHelp);

        // === Engine selector ===
        self.bind(Context::Engine, KeySpec::plain(KeyCode::Left), Action::CycleEngine);
        self.bind(Context::Engine, KeySpec::plain(KeyCode::Right), Action::CycleEngine);
        self.bind(
            Context::Engine,
            KeySpec::plain(KeyCode::Char(' ')),
            Action::CycleEngine,
        );
        self.bind(Context::Engine, KeySpec::plain(KeyCode::Enter), Action::CycleEngine);

        // === Search term: Enter searches ===
        self.bind(Context::SearchTerm, KeySpec::plain(KeyCode::Enter), Action::Search);

        // === Buttons ===
        self.bind(Context::Button, KeySpec::plain(KeyCode::Enter), Action::Activate);
        self.bind(
            Context::Button,
            KeySpec::plain(KeyCode::Char(' ')),
            Action::Activate,
        );
        self.bind(Context::Button, KeySpec::plain(KeyCode::Left), Action::PrevField);
        self.bind(Context::Button, KeySpec::plain(KeyCode::Right), Action::NextField);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "generate").
    /// Values are key strings (e.g., "Ctrl+q", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            let mut contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts_for_action.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Display string of the first key that triggers `action` from `context`.
    ///
    /// Keys bound in the context itself come first. Global keys shadowed by a
    /// context binding are skipped.
    pub fn key_for(&self, action: Action, context: Context) -> Option<String> {
        let in_context = self
            .bindings
            .iter()
            .filter(|(c, _, a)| *c == context && *a == action);
        let global = self
            .bindings
            .iter()
            .filter(|(c, _, a)| *c == Context::Global && *a == action);

        in_context
            .chain(global)
            .map(|(_, key, _)| key)
            .find(|key| self.action_for_key(key.code, key.modifiers, context) == Some(action))
            .map(format_key)
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "next_field" | "nextfield" | "next" => Some(Action::NextField),
        "prev_field" | "prevfield" | "prev" => Some(Action::PrevField),
        "generate" => Some(Action::Generate),
        "search" | "open" => Some(Action::Search),
        "copy" => Some(Action::Copy),
        "cycle_engine" | "cycleengine" | "engine" => Some(Action::CycleEngine),
        "activate" | "press" => Some(Action::Activate),
        "clear_field" | "clearfield" | "clear" => Some(Action::ClearField),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
