use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::model::config::ApiConfig;
use crate::model::task::{Task, TaskDraft, TaskId, TaskRecord};

/// Which view operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The fixed user-facing message for a failure of this operation
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch tasks",
            Operation::Create => "Failed to create task",
            Operation::Update => "Failed to update task",
            Operation::Delete => "Failed to delete task",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// What actually went wrong underneath a failed operation. Logged, never shown.
#[derive(Debug, thiserror::Error)]
pub enum FailureCause {
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A failed API call. Displays as the operation's fixed message.
#[derive(Debug, thiserror::Error)]
#[error("{}", .operation.failure_message())]
pub struct ApiError {
    pub operation: Operation,
    #[source]
    pub cause: FailureCause,
}

impl ApiError {
    pub fn new(operation: Operation, cause: impl Into<FailureCause>) -> Self {
        ApiError {
            operation,
            cause: cause.into(),
        }
    }
}

/// The remote task API as the view consumes it
pub trait TaskApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    /// Full replace: `record` must carry every field
    fn replace_task(&self, id: &TaskId, record: &TaskRecord) -> Result<Task, ApiError>;
    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError>;
}

impl<T: TaskApi + ?Sized> TaskApi for Box<T> {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        (**self).list_tasks()
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        (**self).create_task(draft)
    }

    fn replace_task(&self, id: &TaskId, record: &TaskRecord) -> Result<Task, ApiError> {
        (**self).replace_task(id, record)
    }

    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        (**self).delete_task(id)
    }
}

/// Why an `HttpTaskClient` could not be built
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid api base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid api base url {0:?}: it cannot carry a path")]
    CannotBeABase(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// `TaskApi` over HTTP with JSON bodies
pub struct HttpTaskClient {
    client: Client,
    base_url: Url,
}

impl HttpTaskClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&config.base_url).map_err(|source| ClientError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        match base_url.path_segments_mut() {
            Ok(mut segments) => {
                segments.pop_if_empty();
            }
            Err(()) => return Err(ClientError::CannotBeABase(config.base_url.clone())),
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(HttpTaskClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `<base>/tasks`, or `<base>/tasks/<id>` with the id as a single
    /// percent-encoded path segment
    fn tasks_url(&self, id: Option<&TaskId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("tasks");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    /// Send and require a 2xx status
    fn send(&self, operation: Operation, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(|e| ApiError::new(operation, e))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let response = self
            .client
            .execute(request)
            .map_err(|e| ApiError::new(operation, e))?;
        let status = response.status();
        debug!(%operation, %method, path = %path, status = status.as_u16(), "task api response");
        if !status.is_success() {
            return Err(ApiError::new(operation, FailureCause::Status(status)));
        }
        Ok(response)
    }
}

impl TaskApi for HttpTaskClient {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let op = Operation::Fetch;
        let response = self.send(op, self.client.get(self.tasks_url(None)))?;
        response.json().map_err(|e| ApiError::new(op, e))
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let op = Operation::Create;
        let builder = self.client.post(self.tasks_url(None)).json(draft);
        let response = self.send(op, builder)?;
        response.json().map_err(|e| ApiError::new(op, e))
    }

    fn replace_task(&self, id: &TaskId, record: &TaskRecord) -> Result<Task, ApiError> {
        let op = Operation::Update;
        let builder = self.client.put(self.tasks_url(Some(id))).json(record);
        let response = self.send(op, builder)?;
        response.json().map_err(|e| ApiError::new(op, e))
    }

    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let builder = self.client.delete(self.tasks_url(Some(id)));
        self.send(Operation::Delete, builder)?;
        Ok(())
    }
}
