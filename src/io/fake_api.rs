//! In-memory `TaskApi` for tests. Records every call and can be told to fail.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use reqwest::StatusCode;

use crate::io::api_client::{ApiError, FailureCause, Operation, TaskApi};
use crate::model::task::{Task, TaskDraft, TaskId, TaskRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(TaskDraft),
    Replace(TaskId, TaskRecord),
    Delete(TaskId),
}

#[derive(Debug, Default)]
struct FakeState {
    tasks: Vec<Task>,
    calls: Vec<Call>,
    failing: HashSet<Operation>,
    next_id: u64,
}

/// Cloneable handle; clones share the same store
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    inner: Rc<RefCell<FakeState>>,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = FakeApi::default();
        {
            let mut state = api.inner.borrow_mut();
            state.next_id = tasks.len() as u64 + 1;
            state.tasks = tasks;
        }
        api
    }

    pub fn fail(&self, operation: Operation) {
        self.inner.borrow_mut().failing.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.inner.borrow_mut().failing.remove(&operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn stored(&self) -> Vec<Task> {
        self.inner.borrow().tasks.clone()
    }

    fn check(&self, operation: Operation, call: Call) -> Result<(), ApiError> {
        let mut state = self.inner.borrow_mut();
        state.calls.push(call);
        if state.failing.contains(&operation) {
            return Err(ApiError::new(
                operation,
                FailureCause::Status(StatusCode::INTERNAL_SERVER_ERROR),
            ));
        }
        Ok(())
    }

    fn not_found(operation: Operation) -> ApiError {
        ApiError::new(operation, FailureCause::Status(StatusCode::NOT_FOUND))
    }
}

impl TaskApi for FakeApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.check(Operation::Fetch, Call::List)?;
        Ok(self.stored())
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.check(Operation::Create, Call::Create(draft.clone()))?;
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let task = Task {
            id: TaskId::new(format!("t{}", state.next_id)),
            title: draft.title.clone(),
            description: draft.description.clone(),
            due_date: draft.due_date.clone(),
            priority: draft.priority.clone(),
            completed: false,
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    fn replace_task(&self, id: &TaskId, record: &TaskRecord) -> Result<Task, ApiError> {
        self.check(
            Operation::Update,
            Call::Replace(id.clone(), record.clone()),
        )?;
        let mut state = self.inner.borrow_mut();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| Self::not_found(Operation::Update))?;
        task.title = record.title.clone();
        task.description = record.description.clone();
        task.due_date = record.due_date.clone();
        task.priority = record.priority.clone();
        task.completed = record.completed;
        Ok(task.clone())
    }

    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        self.check(Operation::Delete, Call::Delete(id.clone()))?;
        let mut state = self.inner.borrow_mut();
        let before = state.tasks.len();
        state.tasks.retain(|t| &t.id != id);
        if state.tasks.len() == before {
            return Err(Self::not_found(Operation::Delete));
        }
        Ok(())
    }
}
