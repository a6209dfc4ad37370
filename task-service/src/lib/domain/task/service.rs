use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::models::CreateTaskCommand;
use super::models::NewTask;
use super::models::Task;
use super::models::TaskId;
use super::models::TaskName;
use super::models::UpdateTaskCommand;
use super::ports::TaskRepository;
use super::ports::TaskServicePort;
use crate::domain::task::errors::TaskError;
use crate::domain::user::models::UserId;

/// Domain service for owner-scoped task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    /// Create a new task service.
    ///
    /// # Arguments
    /// * `repository` - Task persistence implementation
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    async fn find_owned(&self, owner: UserId, id: TaskId) -> Result<Task, TaskError> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        if task.user_id != owner {
            tracing::warn!(task_id = %id, user_id = %owner, "Task access denied");
            return Err(TaskError::AccessDenied {
                task_id: id,
                user_id: owner,
            });
        }

        Ok(task)
    }

    /// Name lookups that miss are a normal outcome, not an error.
    async fn name_taken(
        &self,
        owner: UserId,
        name: &TaskName,
        except: Option<TaskId>,
    ) -> Result<bool, TaskError> {
        Ok(self
            .repository
            .find_by_user_and_name(owner, name)
            .await?
            .is_some_and(|task| Some(task.id) != except))
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(
        &self,
        owner: UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        if self.name_taken(owner, &command.name, None).await? {
            return Err(TaskError::AlreadyExists(command.name.to_string()));
        }

        let task = self
            .repository
            .create(NewTask {
                user_id: owner,
                name: command.name,
                description: command.description,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(task_id = %task.id, user_id = %owner, "Task created");

        Ok(task)
    }

    async fn list_tasks(&self, owner: UserId) -> Result<Vec<Task>, TaskError> {
        self.repository.find_by_user(owner).await
    }

    async fn get_task(&self, owner: UserId, id: TaskId) -> Result<Task, TaskError> {
        self.find_owned(owner, id).await
    }

    async fn update_task(
        &self,
        owner: UserId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        if command.name.is_none() && command.description.is_none() {
            return Err(TaskError::EmptyUpdate);
        }

        let mut task = self.find_owned(owner, id).await?;

        if let Some(name) = command.name {
            if name != task.name && self.name_taken(owner, &name, Some(id)).await? {
                return Err(TaskError::AlreadyExists(name.to_string()));
            }
            task.name = name;
        }

        if let Some(description) = command.description {
            task.description = description;
        }

        let task = self.repository.update(task).await?;
        tracing::info!(task_id = %task.id, user_id = %owner, "Task updated");

        Ok(task)
    }

    async fn delete_task(&self, owner: UserId, id: TaskId) -> Result<(), TaskError> {
        self.find_owned(owner, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(task_id = %id, user_id = %owner, "Task deleted");

        Ok(())
    }
}
