use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::io::api_client::{HttpTaskClient, TaskApi};
use crate::model::{AppConfig, FormField, Task, TaskId};
use crate::ops::controller::TaskController;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the task table
    Navigate,
    /// Editing the create form
    Form,
    /// Waiting for y/n on a pending delete
    Confirm,
}

/// A request queued by input handling. It runs after the next draw so the
/// busy state is on screen while the call blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Load,
    Submit,
    Toggle(TaskId),
    Delete,
}

/// Main application state
pub struct App {
    pub controller: TaskController<Box<dyn TaskApi>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Selected row in the task table
    pub cursor: usize,
    /// Focused form field
    pub form_focus: FormField,
    /// Byte offset of the edit cursor in the focused text field
    pub edit_cursor: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// One-shot hint shown in the status row
    pub status_message: Option<String>,
    pub pending: Option<PendingAction>,
}

impl App {
    /// Build the app and queue the initial load
    pub fn new(api: Box<dyn TaskApi>, theme: Theme) -> Self {
        let mut app = App {
            controller: TaskController::new(api),
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            form_focus: FormField::Title,
            edit_cursor: 0,
            show_help: false,
            status_message: None,
            pending: None,
        };
        app.queue(PendingAction::Load);
        app
    }

    pub fn tasks(&self) -> &[Task] {
        &self.controller.state().tasks
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks().get(self.cursor)
    }

    /// Show the busy state now and run `action` after the next draw.
    /// Ignored while another action is queued.
    pub fn queue(&mut self, action: PendingAction) {
        if self.pending.is_some() {
            return;
        }
        let runnable = match &action {
            PendingAction::Toggle(id) => self.controller.state().find_task(id).is_some(),
            PendingAction::Delete => self.controller.pending_delete().is_some(),
            PendingAction::Load | PendingAction::Submit => true,
        };
        if !runnable {
            return;
        }
        self.controller.begin();
        self.pending = Some(action);
    }

    /// Run the queued action, if any
    pub fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };
        match action {
            PendingAction::Load => self.controller.load(),
            PendingAction::Submit => {
                self.controller.submit();
                if self.controller.state().error.is_none() {
                    self.status_message = Some("Task added".to_string());
                    self.form_focus = FormField::Title;
                    self.edit_cursor = 0;
                    self.mode = Mode::Navigate;
                }
            }
            PendingAction::Toggle(id) => self.controller.toggle_completion(&id),
            PendingAction::Delete => self.controller.confirm_delete(),
        }
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.tasks().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    /// Focus a form field and put the edit cursor at its end
    pub fn focus_field(&mut self, field: FormField) {
        self.form_focus = field;
        self.edit_cursor = self.controller.form().value(field).len();
    }
}

/// Run the TUI application
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpTaskClient::new(&config.api)?;
    info!(base_url = client.base_url(), "starting task board");
    let mut app = App::new(Box::new(client), Theme::from_config(&config.ui));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
