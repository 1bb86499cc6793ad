//! Form widgets: header, engine selector, text fields, buttons and the
//! generated-link panel.

use crate::app::{App, FormField};
use crate::util::{display_width, tail_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TERM_PLACEHOLDER: &str = "Type what you want to search...";
const BASE_URL_PLACEHOLDER: &str = "https://example.com/api/search";

const COPY_LABEL: &str = "[ Copy ]";
const COPIED_LABEL: &str = "[ ✓ Copied ]";

fn field_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        app.style("field_border_focused")
    } else {
        app.style("field_border")
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn button_style(app: &App, field: FormField, role: &str) -> Style {
    if app.focus == field {
        app.style("button_focused")
    } else {
        app.style(role)
    }
}

pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Search Injector", app.style("title"))),
        Line::from(Span::styled(
            " Build a search link, or send the term to your own endpoint",
            app.style("subtitle"),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

pub fn render_engine(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == FormField::Engine;
    let mut spans = vec![Span::styled(
        format!("◀ {} ▶", app.request.engine.label()),
        app.style("field_text"),
    )];

    // A base URL takes precedence over the engine
    if !app.request.base_url.trim().is_empty() {
        spans.push(Span::styled(
            "  (not used while a base URL is set)",
            app.style("field_placeholder"),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(field_block(app, " Engine ", focused));
    f.render_widget(paragraph, area);
}

pub fn render_search_term(f: &mut Frame, app: &App, area: Rect) {
    render_text_field(
        f,
        app,
        area,
        FormField::SearchTerm,
        " Search term ",
        &app.request.search_term,
        TERM_PLACEHOLDER,
    );
}

pub fn render_base_url(f: &mut Frame, app: &App, area: Rect) {
    render_text_field(
        f,
        app,
        area,
        FormField::BaseUrl,
        " Base URL (optional) ",
        &app.request.base_url,
        BASE_URL_PLACEHOLDER,
    );
}

/// Single-line input. Long values scroll so the end stays visible.
fn render_text_field(
    f: &mut Frame,
    app: &App,
    area: Rect,
    field: FormField,
    title: &str,
    value: &str,
    placeholder: &str,
) {
    let focused = app.focus == field;
    let block = field_block(app, title, focused);
    let inner = block.inner(area);

    // One column is reserved for the cursor
    let visible = tail_to_width(value, (inner.width as usize).saturating_sub(1));

    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder, app.style("field_placeholder")))
    } else {
        Line::from(Span::styled(visible, app.style("field_text")))
    };
    f.render_widget(Paragraph::new(line).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let offset = (display_width(visible) as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((inner.x + offset, inner.y));
    }
}

pub fn render_buttons(f: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "[ Generate ]",
            button_style(app, FormField::GenerateButton, "button_generate"),
        ),
        Span::raw("  "),
        Span::styled(
            "[ Search ]",
            button_style(app, FormField::SearchButton, "button_search"),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The generated link with its copy button.
pub fn render_result(f: &mut Frame, app: &App, url: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Generated link ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let copied = app.copied.is_active();
    let label = if copied { COPIED_LABEL } else { COPY_LABEL };
    let state_role = if copied { "copy_done" } else { "copy_idle" };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(display_width(COPIED_LABEL) as u16 + 1),
        ])
        .split(inner);

    let link = Paragraph::new(Span::styled(url, app.style("result_url")))
        .wrap(Wrap { trim: false });
    f.render_widget(link, chunks[0]);

    let button = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(label, button_style(app, FormField::CopyButton, state_role)),
    ]));
    f.render_widget(button, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[tokio::test]
    async fn long_value_keeps_tail_visible() {
        let (tx, _rx) = mpsc::channel::<AppEvent>(4);
        let mut app = App::new(&Config::default(), tx);
        app.insert_text(&format!("{}END", "a".repeat(100)));

        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|f| render_search_term(f, &app, f.area()))
            .unwrap();

        assert!(row_text(&terminal, 1).contains("aaEND"));
    }

    #[tokio::test]
    async fn engine_hint_shown_with_base_url() {
        let (tx, _rx) = mpsc::channel::<AppEvent>(4);
        let mut app = App::new(&Config::default(), tx);
        app.insert_text_into(FormField::BaseUrl, "https://x.com");

        let mut terminal = Terminal::new(TestBackend::new(70, 3)).unwrap();
        terminal.draw(|f| render_engine(f, &app, f.area())).unwrap();

        let row = row_text(&terminal, 1);
        assert!(row.contains("Google"));
        assert!(row.contains("not used"));
    }

    #[tokio::test]
    async fn copy_button_reflects_indicator() {
        let (tx, _rx) = mpsc::channel::<AppEvent>(4);
        let mut app = App::new(&Config::default(), tx);
        app.copied.set();

        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| render_result(f, &app, "https://www.google.com/search?q=x", f.area()))
            .unwrap();

        assert!(row_text(&terminal, 1).contains("Copied"));
    }
}
