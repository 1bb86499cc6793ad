use crate::app::{App, FormField};
use crate::keybindings::Action as KbAction;
use crate::notify::Notification;
use crate::theme::notification_role;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Actions hinted for each focused field, in display order.
fn hinted_actions(focus: FormField) -> &'static [KbAction] {
    match focus {
        FormField::SearchTerm => &[
            KbAction::Search,
            KbAction::NextField,
            KbAction::Generate,
            KbAction::Copy,
            KbAction::CycleEngine,
            KbAction::ShowHelp,
            KbAction::Quit,
        ],
        FormField::BaseUrl => &[
            KbAction::NextField,
            KbAction::Generate,
            KbAction::Search,
            KbAction::Copy,
            KbAction::ClearField,
            KbAction::ShowHelp,
            KbAction::Quit,
        ],
        FormField::Engine => &[
            KbAction::CycleEngine,
            KbAction::NextField,
            KbAction::ShowHelp,
            KbAction::Quit,
        ],
        FormField::GenerateButton | FormField::SearchButton | FormField::CopyButton => &[
            KbAction::Activate,
            KbAction::PrevField,
            KbAction::NextField,
            KbAction::ShowHelp,
            KbAction::Quit,
        ],
    }
}

/// Key hints for the focused field, using the keys currently bound.
/// Actions with no reachable key are left out.
fn key_hints(app: &App) -> String {
    let context = app.focus.context();
    hinted_actions(app.focus)
        .iter()
        .filter_map(|&action| {
            app.keybindings
                .key_for(action, context)
                .map(|key| format!("[{}]{}", key, action.hint_label()))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the key-hint bar. Hints follow the focused field.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let hints = key_hints(app);
    let text = truncate_to_width(&hints, area.width as usize);
    f.render_widget(Paragraph::new(text).style(app.style("status_bar")), area);
}

/// Render the notification toast.
pub fn render_toast(f: &mut Frame, app: &App, note: &Notification, area: Rect) {
    if area.width < 6 || area.height < 3 {
        return;
    }

    let style = app.style(notification_role(note.kind));
    let inner_width = area.width.saturating_sub(4) as usize;
    let line = format!("{} {}", note.kind.icon(), note.message);
    let text = truncate_to_width(&line, inner_width);

    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(format!(" {}", text))
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(paragraph, area);
}
