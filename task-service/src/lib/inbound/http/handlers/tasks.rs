use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskName;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let owner = owner_from_path(&current_user, &user_id)?;
    let Json(body) = body?;

    state
        .task_service
        .create_task(owner, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<TaskResponseData>>, ApiError> {
    let owner = owner_from_path(&current_user, &user_id)?;

    state
        .task_service
        .list_tasks(owner)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskResponseData::from).collect()))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path((user_id, task_id)): Path<(String, String)>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let owner = owner_from_path(&current_user, &user_id)?;
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .get_task(owner, task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path((user_id, task_id)): Path<(String, String)>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let owner = owner_from_path(&current_user, &user_id)?;
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;
    let Json(body) = body?;

    state
        .task_service
        .update_task(owner, task_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path((user_id, task_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let owner = owner_from_path(&current_user, &user_id)?;
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .delete_task(owner, task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// Tasks are only reachable under the caller's own user id.
fn owner_from_path(current_user: &AuthenticatedUser, user_id: &str) -> Result<UserId, ApiError> {
    let owner = UserId::from_string(user_id).map_err(UserError::from)?;
    current_user.authorize(owner)?;
    Ok(owner)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    name: String,
    description: String,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        Ok(CreateTaskCommand {
            name: TaskName::new(self.name)?,
            description: TaskDescription::new(self.description)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        Ok(UpdateTaskCommand {
            name: self.name.map(TaskName::new).transpose()?,
            description: self.description.map(TaskDescription::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseData {
    pub task_id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponseData {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id.0,
            user_id: task.user_id.0,
            name: task.name.as_str().to_string(),
            description: task.description.as_str().to_string(),
            created_at: task.created_at,
        }
    }
}
