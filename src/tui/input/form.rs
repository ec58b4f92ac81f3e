use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::FormField;
use crate::tui::app::{App, Mode, PendingAction};
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Longest accepted due date entry (YYYY-MM-DD)
const DATE_LEN: usize = 10;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let focus = app.form_focus;
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.mode = Mode::Navigate,
        (_, KeyCode::Tab) => app.focus_field(focus.next()),
        (_, KeyCode::BackTab) => app.focus_field(focus.prev()),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => try_submit(app),
        (_, KeyCode::Enter) if focus == FormField::Description => insert_char(app, '\n'),
        (_, KeyCode::Enter) => try_submit(app),
        _ if focus == FormField::Priority => handle_priority_key(app, key),
        _ => handle_text_key(app, key),
    }
}

/// Submit if every field satisfies its input constraint; otherwise focus
/// the first offending field and say why.
fn try_submit(app: &mut App) {
    match app.controller.form().first_invalid() {
        Some(field) => {
            let hint = match field {
                FormField::DueDate if !app.controller.form().due_date.is_empty() => {
                    "Due Date must be YYYY-MM-DD".to_string()
                }
                FormField::Priority => "Select a priority".to_string(),
                other => format!("{} is required", other.label()),
            };
            app.status_message = Some(hint);
            app.focus_field(field);
        }
        None => app.queue(PendingAction::Submit),
    }
}

fn handle_priority_key(app: &mut App, key: KeyEvent) {
    let form = app.controller.form_mut();
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            form.cycle_priority(false)
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') | KeyCode::Char('l')
        | KeyCode::Char('j') => form.cycle_priority(true),
        KeyCode::Backspace | KeyCode::Delete => form.priority.clear(),
        _ => {}
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    let field = app.form_focus;
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_word_key(app, key);
        return;
    }
    match key.code {
        KeyCode::Char(c) => insert_char(app, c),
        KeyCode::Backspace => {
            let value = app.controller.form().value(field);
            if let Some(start) = prev_grapheme_boundary(value, app.edit_cursor) {
                let end = app.edit_cursor;
                app.controller.form_mut().value_mut(field).replace_range(start..end, "");
                app.edit_cursor = start;
            }
        }
        KeyCode::Delete => {
            let value = app.controller.form().value(field);
            if let Some(end) = next_grapheme_boundary(value, app.edit_cursor) {
                let start = app.edit_cursor;
                app.controller.form_mut().value_mut(field).replace_range(start..end, "");
            }
        }
        KeyCode::Left => {
            let value = app.controller.form().value(field);
            if let Some(pos) = prev_grapheme_boundary(value, app.edit_cursor) {
                app.edit_cursor = pos;
            }
        }
        KeyCode::Right => {
            let value = app.controller.form().value(field);
            if let Some(pos) = next_grapheme_boundary(value, app.edit_cursor) {
                app.edit_cursor = pos;
            }
        }
        KeyCode::Home => app.edit_cursor = 0,
        KeyCode::End => app.edit_cursor = app.controller.form().value(field).len(),
        _ => {}
    }
}

/// Ctrl+Left/Right move by word, Ctrl+W deletes the word before the cursor
fn handle_word_key(app: &mut App, key: KeyEvent) {
    let field = app.form_focus;
    let value = app.controller.form().value(field);
    match key.code {
        KeyCode::Left => app.edit_cursor = word_boundary_left(value, app.edit_cursor),
        KeyCode::Right => app.edit_cursor = word_boundary_right(value, app.edit_cursor),
        KeyCode::Char('w') | KeyCode::Backspace => {
            let start = word_boundary_left(value, app.edit_cursor);
            let end = app.edit_cursor;
            app.controller.form_mut().value_mut(field).replace_range(start..end, "");
            app.edit_cursor = start;
        }
        _ => {}
    }
}

fn insert_char(app: &mut App, c: char) {
    let field = app.form_focus;
    if field == FormField::DueDate {
        let len = app.controller.form().due_date.len();
        if !(c.is_ascii_digit() || c == '-') || len >= DATE_LEN {
            return;
        }
    }
    if field == FormField::Title && c == '\n' {
        return;
    }
    let cursor = app.edit_cursor;
    app.controller.form_mut().value_mut(field).insert(cursor, c);
    app.edit_cursor = cursor + c.len_utf8();
}
