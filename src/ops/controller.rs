use tracing::{debug, error, info};

use crate::io::api_client::{ApiError, TaskApi};
use crate::model::task::{Task, TaskId};
use crate::model::view::{FormState, ViewState};
use crate::ops::sort::sort_tasks;

/// The task view's controller: owns the view and form state and runs every
/// transition against a `TaskApi`.
///
/// Each operation goes Loading -> call(s) -> Idle. Mutations never patch
/// `tasks` from the response; they re-fetch the whole list afterwards.
/// Failures land in `ViewState::error` and never propagate.
pub struct TaskController<A: TaskApi> {
    api: A,
    state: ViewState,
    form: FormState,
    /// Task awaiting delete confirmation
    pending_delete: Option<TaskId>,
}

impl<A: TaskApi> TaskController<A> {
    pub fn new(api: A) -> Self {
        TaskController {
            api,
            state: ViewState::default(),
            form: FormState::default(),
            pending_delete: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_busy(&self) -> bool {
        self.state.loading
    }

    pub fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    /// Enter Loading and clear the previous error. Idempotent, so a caller
    /// may show the busy state before the operation itself starts.
    pub fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    fn finish(&mut self, result: Result<(), ApiError>) {
        self.state.loading = false;
        if let Err(e) = result {
            error!(operation = %e.operation, cause = %e.cause, "{}", e);
            self.state.error = Some(e.to_string());
        }
    }

    /// Replace `tasks` with the server's list, sorted
    fn refresh(&mut self) -> Result<(), ApiError> {
        let tasks = self.api.list_tasks()?;
        debug!(count = tasks.len(), "task list fetched");
        self.state.tasks = sort_tasks(&tasks);
        Ok(())
    }

    /// Initial load, also used for manual refresh. On failure `tasks` keeps
    /// its previous value.
    pub fn load(&mut self) {
        self.begin();
        let result = self.refresh();
        self.finish(result);
    }

    /// Create a task from the form, then reload. The form is reset only if
    /// both the create and the reload succeed.
    pub fn submit(&mut self) {
        self.begin();
        let draft = self.form.to_draft();
        let result = self.api.create_task(&draft).and_then(|created| {
            info!(id = %created.id, "task created");
            self.refresh()
        });
        if result.is_ok() {
            self.form.reset();
        }
        self.finish(result);
    }

    /// Flip `completed` on a listed task via full replace, then reload.
    /// Ids not in the current list are ignored.
    pub fn toggle_completion(&mut self, id: &TaskId) {
        let Some(record) = self.state.find_task(id).map(Task::toggled_record) else {
            debug!(%id, "toggle ignored: task not in list");
            return;
        };
        self.begin();
        let result = self.api.replace_task(id, &record).and_then(|updated| {
            info!(id = %updated.id, completed = updated.completed, "task updated");
            self.refresh()
        });
        self.finish(result);
    }

    /// First phase of delete: remember the task and wait for confirmation.
    /// No request is made.
    pub fn request_delete(&mut self, id: &TaskId) {
        self.pending_delete = Some(id.clone());
    }

    /// Decline the pending delete. No request is made.
    pub fn cancel_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            debug!(%id, "delete declined");
        }
    }

    /// Second phase of delete: delete the pending task, then reload.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.begin();
        let result = self.api.delete_task(&id).and_then(|()| {
            info!(%id, "task deleted");
            self.refresh()
        });
        self.finish(result);
    }
}
