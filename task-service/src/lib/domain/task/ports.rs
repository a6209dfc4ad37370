use async_trait::async_trait;

use super::models::CreateTaskCommand;
use super::models::NewTask;
use super::models::Task;
use super::models::TaskId;
use super::models::TaskName;
use super::models::UpdateTaskCommand;
use crate::domain::task::errors::TaskError;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
///
/// Every operation acts on behalf of `owner`, the authenticated user.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a new task.
    ///
    /// # Errors
    /// * `AlreadyExists` - Owner already has a task with this name
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, owner: UserId, command: CreateTaskCommand)
        -> Result<Task, TaskError>;

    /// List the owner's tasks, newest first.
    async fn list_tasks(&self, owner: UserId) -> Result<Vec<Task>, TaskError>;

    /// Retrieve one of the owner's tasks.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to another user
    async fn get_task(&self, owner: UserId, id: TaskId) -> Result<Task, TaskError>;

    /// Update name and/or description of one of the owner's tasks.
    ///
    /// # Errors
    /// * `EmptyUpdate` - Command carries no field
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to another user
    /// * `AlreadyExists` - Owner already has another task with the new name
    async fn update_task(
        &self,
        owner: UserId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Delete one of the owner's tasks.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AccessDenied` - Task belongs to another user
    async fn delete_task(&self, owner: UserId, id: TaskId) -> Result<(), TaskError>;
}

/// Repository port for task persistence operations.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist a new task.
    ///
    /// # Returns
    /// Created task with its store-assigned identifier
    ///
    /// # Errors
    /// * `AlreadyExists` - (owner, name) pair is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: NewTask) -> Result<Task, TaskError>;

    /// Retrieve task by identifier, regardless of owner.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// Retrieve all tasks of a user, newest first.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskError>;

    /// Retrieve a user's task by name.
    async fn find_by_user_and_name(
        &self,
        user_id: UserId,
        name: &TaskName,
    ) -> Result<Option<Task>, TaskError>;

    /// Update an existing task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `AlreadyExists` - New name is already taken by the owner
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Remove a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete(&self, id: TaskId) -> Result<(), TaskError>;
}
