//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry using the focused
//! field's context. Unbound printable keys go to the focused text field.

use crate::app::App;
use crate::keybindings::Action as KbAction;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
pub(super) async fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    let context = app.focus.context();
    match app.keybindings.action_for_key(code, modifiers, context) {
        Some(action) => dispatch(app, action).await,
        None => {
            handle_text_input(app, code, modifiers);
            Action::Continue
        }
    }
}

async fn dispatch(app: &mut App, action: KbAction) -> Action {
    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NextField => app.focus_next(),
        KbAction::PrevField => app.focus_prev(),
        KbAction::Generate => app.generate(),
        KbAction::Search => app.search(),
        KbAction::Copy => app.copy().await,
        KbAction::CycleEngine => {
            let engine = app.cycle_engine();
            tracing::debug!(engine = engine.label(), "Engine changed");
        }
        KbAction::Activate => app.activate_focused().await,
        KbAction::ClearField => app.clear_field(),
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            tracing::debug!(theme = name, "Theme changed");
        }
        KbAction::ShowHelp => app.show_help = true,
    }
    Action::Continue
}

/// Edit the focused text field with an unbound key.
fn handle_text_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut buf = [0u8; 4];
            app.insert_text(c.encode_utf8(&mut buf));
        }
        _ => {}
    }
}

/// Insert a bracketed paste into the focused text field.
pub(super) fn handle_paste(app: &mut App, text: &str) {
    if app.show_help {
        return;
    }
    app.insert_text(text);
}

/// Handle input while the help overlay is visible. Any dismiss key closes it.
fn handle_help_input(app: &mut App, code: KeyCode) {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter
    ) {
        app.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppEvent, FormField};
    use crate::builder::Engine;
    use crate::config::Config;
    use crate::notify::NotificationKind;
    use crate::platform::{BrowserOpener, ClipboardBackend, ClipboardError, OpenError};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingBrowser {
        opened: Mutex<Vec<String>>,
    }

    impl BrowserOpener for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), OpenError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct NullClipboard;

    impl ClipboardBackend for NullClipboard {
        fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn test_app_with_browser() -> (App, mpsc::Receiver<AppEvent>, Arc<RecordingBrowser>) {
        let (tx, rx) = mpsc::channel(16);
        let browser = Arc::new(RecordingBrowser::default());
        let app = App::with_platform(
            &Config::default(),
            tx,
            Arc::new(NullClipboard),
            browser.clone(),
        );
        (app, rx, browser)
    }

    fn test_app() -> (App, mpsc::Receiver<AppEvent>) {
        let (app, rx, _) = test_app_with_browser();
        (app, rx)
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_input(app, KeyCode::Char(c), KeyModifiers::NONE).await;
        }
    }

    #[tokio::test]
    async fn test_typing_fills_search_term() {
        let (mut app, _rx) = test_app();
        type_str(&mut app, "Cats q?").await;
        assert_eq!(app.request.search_term, "Cats q?");

        handle_input(&mut app, KeyCode::Backspace, KeyModifiers::NONE).await;
        assert_eq!(app.request.search_term, "Cats q");
    }

    #[tokio::test]
    async fn test_shifted_chars_are_typed() {
        let (mut app, _rx) = test_app();
        handle_input(&mut app, KeyCode::Char('G'), KeyModifiers::SHIFT).await;
        assert_eq!(app.request.search_term, "G");
    }

    #[tokio::test]
    async fn test_ctrl_g_generates() {
        let (mut app, _rx) = test_app();
        type_str(&mut app, "cats").await;
        handle_input(&mut app, KeyCode::Char('g'), KeyModifiers::CONTROL).await;

        assert_eq!(app.request.search_term, "cats");
        assert_eq!(
            app.generated_url.as_deref(),
            Some("https://www.google.com/search?q=cats")
        );
    }

    #[tokio::test]
    async fn test_enter_in_term_field_opens_search() {
        let (mut app, _rx, browser) = test_app_with_browser();
        type_str(&mut app, "rust lang").await;
        assert_eq!(app.focus, FormField::SearchTerm);
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE).await;

        let expected = "https://www.google.com/search?q=rust%20lang";
        assert_eq!(*browser.opened.lock().unwrap(), vec![expected.to_string()]);
        assert_eq!(app.generated_url.as_deref(), Some(expected));
        assert_eq!(app.notification().unwrap().kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn test_enter_in_term_field_with_blank_term_opens_nothing() {
        let (mut app, _rx, browser) = test_app_with_browser();
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE).await;

        assert!(browser.opened.lock().unwrap().is_empty());
        assert_eq!(app.notification().unwrap().kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_enter_in_base_url_field_opens_nothing() {
        let (mut app, _rx, browser) = test_app_with_browser();
        type_str(&mut app, "cats").await;
        app.focus = FormField::BaseUrl;
        type_str(&mut app, "https://x.com/api").await;
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE).await;

        assert!(browser.opened.lock().unwrap().is_empty());
        assert!(app.generated_url.is_none());
        assert!(app.notification().is_none());
    }

    #[tokio::test]
    async fn test_search_button_opens_search() {
        let (mut app, _rx, browser) = test_app_with_browser();
        type_str(&mut app, "dogs").await;
        app.focus = FormField::SearchButton;
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE).await;

        assert_eq!(
            *browser.opened.lock().unwrap(),
            vec!["https://www.google.com/search?q=dogs".to_string()]
        );
    }

    #[tokio::test]
    async fn test_tab_moves_between_fields() {
        let (mut app, _rx) = test_app();
        handle_input(&mut app, KeyCode::Tab, KeyModifiers::NONE).await;
        assert_eq!(app.focus, FormField::BaseUrl);
        type_str(&mut app, "https://x.com").await;
        assert_eq!(app.request.base_url, "https://x.com");
        assert!(app.request.search_term.is_empty());

        handle_input(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT).await;
        assert_eq!(app.focus, FormField::SearchTerm);
    }

    #[tokio::test]
    async fn test_engine_selector_cycles() {
        let (mut app, _rx) = test_app();
        app.focus = FormField::Engine;
        handle_input(&mut app, KeyCode::Right, KeyModifiers::NONE).await;
        assert_eq!(app.request.engine, Engine::Bing);
        // Typing on the selector does nothing
        type_str(&mut app, "x").await;
        assert!(app.request.search_term.is_empty());
    }

    #[tokio::test]
    async fn test_generate_button_activates() {
        let (mut app, _rx) = test_app();
        type_str(&mut app, "dogs").await;
        app.focus = FormField::GenerateButton;
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE).await;

        assert!(app.generated_url.is_some());
        assert_eq!(app.notification().unwrap().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_ctrl_y_without_link_reports_error() {
        let (mut app, _rx) = test_app();
        handle_input(&mut app, KeyCode::Char('y'), KeyModifiers::CONTROL).await;
        let note = app.notification().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Nothing to copy!");
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _rx) = test_app();
        assert!(matches!(
            handle_input(&mut app, KeyCode::Esc, KeyModifiers::NONE).await,
            Action::Quit
        ));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL).await,
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let (mut app, _rx) = test_app();
        handle_input(&mut app, KeyCode::F(1), KeyModifiers::NONE).await;
        assert!(app.show_help);

        // Esc closes help instead of quitting
        assert!(matches!(
            handle_input(&mut app, KeyCode::Esc, KeyModifiers::NONE).await,
            Action::Continue
        ));
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn test_paste_goes_to_focused_field() {
        let (mut app, _rx) = test_app();
        app.focus = FormField::BaseUrl;
        handle_paste(&mut app, "https://x.com/api?x=1\n");
        assert_eq!(app.request.base_url, "https://x.com/api?x=1 ");
    }

    #[tokio::test]
    async fn test_ctrl_u_clears_field() {
        let (mut app, _rx) = test_app();
        type_str(&mut app, "cats").await;
        handle_input(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL).await;
        assert!(app.request.search_term.is_empty());
    }
}
