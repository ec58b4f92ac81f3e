use crossterm::event::{KeyCode, KeyEvent};

use crate::model::FormField;
use crate::tui::app::{App, Mode, PendingAction};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.tasks().len().saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('t') => {
            if let Some(id) = app.selected_task().map(|t| t.id.clone()) {
                app.queue(PendingAction::Toggle(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_task().map(|t| t.id.clone()) {
                app.controller.request_delete(&id);
                app.mode = Mode::Confirm;
            }
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.mode = Mode::Form;
            app.focus_field(FormField::Title);
        }
        KeyCode::Char('r') => app.queue(PendingAction::Load),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i32) {
    let count = app.tasks().len();
    if count == 0 {
        return;
    }
    let new_cursor = (app.cursor as i32 + delta).clamp(0, count as i32 - 1);
    app.cursor = new_cursor as usize;
}
