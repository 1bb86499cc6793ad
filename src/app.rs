use crate::builder::{BuildError, Engine, ParamDefaults, SearchRequest};
use crate::config::Config;
use crate::keybindings::{Context as KbContext, KeybindingRegistry};
use crate::notify::{CopyIndicator, Notification, NotificationKind, NotificationScheduler};
use crate::platform::{
    BrowserOpener, ClipboardBackend, ClipboardError, OpenError, SystemBrowser, SystemClipboard,
};
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::sanitize_field_input;
use ratatui::style::Style;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Maximum length of a form field, in characters.
pub const MAX_FIELD_LENGTH: usize = 2048;

pub const MSG_GENERATED: &str = "Link generated successfully!";
pub const MSG_OPENED: &str = "Search opened in your browser!";
pub const MSG_COPIED: &str = "Link copied to clipboard!";

// ============================================================================
// Events
// ============================================================================

/// Events delivered to the event loop by background tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The notification timer armed with this generation ran out.
    NotificationExpired(u64),
    /// The copy indicator timer armed with this generation ran out.
    CopyIndicatorExpired(u64),
}

// ============================================================================
// Errors
// ============================================================================

/// Failures of a user action. All of them end up as an error notification.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("search term is empty")]
    EmptyTerm,

    #[error("no generated link to copy")]
    EmptyResult,

    #[error("clipboard write failed: {0}")]
    ClipboardWrite(#[from] ClipboardError),

    #[error("refusing to open non-http(s) link: {0}")]
    OpenRejected(String),

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("could not build link: {0}")]
    Payload(String),
}

impl From<BuildError> for ActionError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::EmptyTerm => Self::EmptyTerm,
            BuildError::Payload(msg) => Self::Payload(msg),
        }
    }
}

impl ActionError {
    /// Message shown to the user in the error notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyTerm => "Please enter a search term!",
            Self::EmptyResult => "Nothing to copy!",
            Self::ClipboardWrite(_) => "Failed to copy the link.",
            Self::OpenRejected(_) => "Only http(s) links can be opened.",
            Self::Open(_) => "Failed to open the browser.",
            Self::Payload(_) => "Failed to build the link.",
        }
    }
}

// ============================================================================
// Form Focus
// ============================================================================

/// Focusable elements of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Engine,
    SearchTerm,
    BaseUrl,
    GenerateButton,
    SearchButton,
    CopyButton,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        Self::Engine,
        Self::SearchTerm,
        Self::BaseUrl,
        Self::GenerateButton,
        Self::SearchButton,
        Self::CopyButton,
    ];

    /// Next field in tab order. The copy button only takes focus when visible.
    pub fn next(self, copy_visible: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let mut next = Self::ORDER[(idx + 1) % len];
        if next == Self::CopyButton && !copy_visible {
            next = Self::ORDER[(idx + 2) % len];
        }
        next
    }

    pub fn prev(self, copy_visible: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let mut prev = Self::ORDER[(idx + len - 1) % len];
        if prev == Self::CopyButton && !copy_visible {
            prev = Self::ORDER[(idx + len - 2) % len];
        }
        prev
    }

    pub fn context(self) -> KbContext {
        match self {
            Self::Engine => KbContext::Engine,
            Self::SearchTerm => KbContext::SearchTerm,
            Self::BaseUrl => KbContext::BaseUrl,
            Self::GenerateButton | Self::SearchButton | Self::CopyButton => KbContext::Button,
        }
    }
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    /// Current form values.
    pub request: SearchRequest,
    pub focus: FormField,

    /// Last successfully built link. Overwritten on every successful build.
    pub generated_url: Option<String>,

    pub notifications: NotificationScheduler<AppEvent>,
    pub copied: CopyIndicator<AppEvent>,

    /// Fixed fields of the params-mode payload.
    pub params: ParamDefaults,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub show_help: bool,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    clipboard: Arc<dyn ClipboardBackend>,
    browser: Arc<dyn BrowserOpener>,
}

impl App {
    /// Create an app backed by the system clipboard and browser.
    pub fn new(config: &Config, event_tx: mpsc::Sender<AppEvent>) -> Self {
        Self::with_platform(
            config,
            event_tx,
            Arc::new(SystemClipboard::default()),
            Arc::new(SystemBrowser),
        )
    }

    pub fn with_platform(
        config: &Config,
        event_tx: mpsc::Sender<AppEvent>,
        clipboard: Arc<dyn ClipboardBackend>,
        browser: Arc<dyn BrowserOpener>,
    ) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        Self {
            request: SearchRequest {
                engine: config.engine,
                ..SearchRequest::default()
            },
            focus: FormField::SearchTerm,
            generated_url: None,
            notifications: NotificationScheduler::new(
                event_tx.clone(),
                AppEvent::NotificationExpired,
            ),
            copied: CopyIndicator::new(event_tx, AppEvent::CopyIndicatorExpired),
            params: config.params.clone(),
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            show_help: false,
            needs_redraw: true,
            clipboard,
            browser,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        self.theme_variant = self.theme_variant.next();
        self.theme = StyleMap::from_palette(&self.theme_variant.palette());
        self.needs_redraw = true;
        self.theme_variant.name()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.show(message, kind);
        self.needs_redraw = true;
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    fn notify_error(&mut self, err: &ActionError) {
        if matches!(err, ActionError::Payload(_)) {
            tracing::error!(error = %err, "Link construction failed");
        }
        self.notify(err.user_message(), NotificationKind::Error);
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Build the link from the form and store it.
    fn build_url(&mut self) -> Result<String, ActionError> {
        let url = self.request.build(&self.params)?;
        tracing::debug!(url = %url, engine = self.request.engine.label(), "Built link");
        self.generated_url = Some(url.clone());
        Ok(url)
    }

    /// "Generate": build the link and report the outcome.
    pub fn generate(&mut self) {
        match self.build_url() {
            Ok(_) => self.notify(MSG_GENERATED, NotificationKind::Success),
            Err(e) => self.notify_error(&e),
        }
    }

    /// "Search": build the link, hand it to the browser, report the outcome.
    pub fn search(&mut self) {
        match self.try_search() {
            Ok(()) => self.notify(MSG_OPENED, NotificationKind::Info),
            Err(e) => {
                if matches!(e, ActionError::Open(_)) {
                    tracing::warn!(error = %e, "Browser launch failed");
                }
                self.notify_error(&e);
            }
        }
    }

    fn try_search(&mut self) -> Result<(), ActionError> {
        let url = self.build_url()?;

        // Only web links go to the OS opener; anything else could be a local path
        match url::Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(ActionError::OpenRejected(url)),
        }

        self.browser.open(&url)?;
        Ok(())
    }

    /// "Copy": write the last generated link to the clipboard.
    ///
    /// Waits for the clipboard write to finish before reporting.
    pub async fn copy(&mut self) {
        match self.try_copy().await {
            Ok(()) => {
                self.notify(MSG_COPIED, NotificationKind::Success);
                self.copied.set();
            }
            Err(e) => {
                if matches!(e, ActionError::ClipboardWrite(_)) {
                    tracing::error!(error = %e, "Failed to copy link");
                }
                self.notify_error(&e);
            }
        }
    }

    async fn try_copy(&mut self) -> Result<(), ActionError> {
        let url = self.generated_url.clone().ok_or(ActionError::EmptyResult)?;
        let clipboard = Arc::clone(&self.clipboard);

        tokio::task::spawn_blocking(move || clipboard.set_text(&url))
            .await
            .map_err(|e| ClipboardError::Unavailable(format!("clipboard task failed: {e}")))??;
        Ok(())
    }

    /// Press whichever button has focus. Text fields and the engine selector
    /// have no press action.
    pub async fn activate_focused(&mut self) {
        match self.focus {
            FormField::GenerateButton => self.generate(),
            FormField::SearchButton => self.search(),
            FormField::CopyButton => self.copy().await,
            FormField::Engine | FormField::SearchTerm | FormField::BaseUrl => {}
        }
    }

    // ------------------------------------------------------------------------
    // Form editing
    // ------------------------------------------------------------------------

    pub fn cycle_engine(&mut self) -> Engine {
        self.request.engine = self.request.engine.next();
        self.request.engine
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.generated_url.is_some());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.generated_url.is_some());
    }

    fn text_field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::SearchTerm => Some(&mut self.request.search_term),
            FormField::BaseUrl => Some(&mut self.request.base_url),
            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        self.text_field_mut(self.focus)
    }

    /// Append typed or pasted text to the focused text field.
    pub fn insert_text(&mut self, text: &str) {
        self.insert_text_into(self.focus, text);
    }

    /// Append text to a text field. Non-text fields ignore it.
    ///
    /// Control characters are dropped, line breaks become spaces, and the
    /// field is capped at [`MAX_FIELD_LENGTH`] characters.
    pub fn insert_text_into(&mut self, field: FormField, text: &str) {
        let clean = sanitize_field_input(text);
        let Some(value) = self.text_field_mut(field) else {
            return;
        };
        let room = MAX_FIELD_LENGTH.saturating_sub(value.chars().count());
        value.extend(clean.chars().take(room));
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_text_mut() {
            field.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(field) = self.focused_text_mut() {
            field.clear();
        }
    }

    // ------------------------------------------------------------------------
    // Timer events
    // ------------------------------------------------------------------------

    /// Apply a background event. Returns true if visible state changed.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        let changed = match event {
            AppEvent::NotificationExpired(generation) => self.notifications.expire(generation),
            AppEvent::CopyIndicatorExpired(generation) => self.copied.expire(generation),
        };
        if changed {
            self.needs_redraw = true;
        }
        changed
    }
}
