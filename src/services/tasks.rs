use crate::errors::ClientError;
use crate::http::ApiClient;
use crate::models::{OwnedTask, Task};
use crate::session::SessionStore;
use serde_json::Value;
use tracing::warn;

const TASKS_PATH: &str = "/tasks";
const ADD_TASK_PATH: &str = "/api/tasks/addTask";

#[derive(Clone)]
pub struct TaskService {
    api: ApiClient,
    session: SessionStore,
}

impl TaskService {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub async fn get_all(&self) -> Result<Value, ClientError> {
        self.api.get(TASKS_PATH).await
    }

    pub async fn create(&self, task: &Task) -> Result<Value, ClientError> {
        self.api.post(TASKS_PATH, task).await
    }

    pub async fn update(&self, id: &str, task: &Task) -> Result<Value, ClientError> {
        self.api.put(&format!("{TASKS_PATH}/{id}"), task).await
    }

    pub async fn remove(&self, id: &str) -> Result<Value, ClientError> {
        self.api.delete(&format!("{TASKS_PATH}/{id}")).await
    }

    /// Creates a task owned by the logged-in user. Fails before any request
    /// is sent when nobody is logged in.
    pub async fn create_for_current_user(&self, task: &Task) -> Result<Value, ClientError> {
        let Some(session) = self.session.current_user() else {
            warn!("task creation attempted without a session");
            return Err(ClientError::no_session());
        };

        let body = OwnedTask {
            task,
            user_id: &session.user_id,
        };
        self.api.post(ADD_TASK_PATH, &body).await
    }
}
