//! Render functions for the TUI.
//!
//! Lays out the form top to bottom and draws the toast and help overlay
//! on top of it.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{form, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 18;

/// Height of the result panel: borders plus three wrapped lines of link.
const RESULT_HEIGHT: u16 = 5;

/// Main render function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let result_height = if app.generated_url.is_some() {
        RESULT_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(result_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    form::render_header(f, app, chunks[0]);
    form::render_engine(f, app, chunks[1]);
    form::render_search_term(f, app, chunks[2]);
    form::render_base_url(f, app, chunks[3]);
    form::render_buttons(f, app, chunks[4]);
    if let Some(url) = &app.generated_url {
        form::render_result(f, app, url, chunks[5]);
    }
    status::render(f, app, chunks[7]);

    if let Some(note) = app.notification() {
        status::render_toast(f, app, note, toast_area(area));
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Top-right corner, clear of the header text.
fn toast_area(area: Rect) -> Rect {
    let width = (area.width / 2).max(30).min(area.width);
    Rect::new(area.x + area.width - width, area.y, width, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppEvent, FormField};
    use crate::config::Config;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (App::new(&Config::default(), tx), rx)
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn test_empty_form_shows_placeholders() {
        let (app, _rx) = test_app();
        let text = buffer_text(&draw(&app, 80, 24));

        assert!(text.contains("Search Injector"));
        assert!(text.contains("Type what you want to search..."));
        assert!(text.contains("https://example.com/api/search"));
        assert!(text.contains("Generate"));
        assert!(!text.contains("Generated link"));
    }

    #[tokio::test]
    async fn test_generated_link_is_displayed() {
        let (mut app, _rx) = test_app();
        app.insert_text("cats");
        app.generate();
        let text = buffer_text(&draw(&app, 80, 24));

        assert!(text.contains("Generated link"));
        assert!(text.contains("https://www.google.com/search?q=cats"));
        assert!(text.contains("Link generated successfully!"));
    }

    #[tokio::test]
    async fn test_typed_values_replace_placeholders() {
        let (mut app, _rx) = test_app();
        app.insert_text("rust");
        app.insert_text_into(FormField::BaseUrl, "https://x.com/api");
        let text = buffer_text(&draw(&app, 80, 24));

        assert!(text.contains("rust"));
        assert!(text.contains("https://x.com/api"));
        assert!(!text.contains("Type what you want to search..."));
    }

    #[tokio::test]
    async fn test_small_terminal_message() {
        let (app, _rx) = test_app();
        let text = buffer_text(&draw(&app, 40, 10));
        assert!(text.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn test_help_overlay_lists_bindings() {
        let (mut app, _rx) = test_app();
        app.show_help = true;
        let text = buffer_text(&draw(&app, 100, 40));
        assert!(text.contains("Help"));
        assert!(text.contains("Ctrl+g"));
    }
}
