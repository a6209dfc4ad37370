use thiserror::Error;

use super::models::TaskId;
use crate::domain::user::models::UserId;

/// Error type for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("invalid task id: {0}")]
    InvalidFormat(String),
}

/// Error type for TaskName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskNameError {
    #[error("task name is empty")]
    Empty,

    #[error("task name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TaskDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDescriptionError {
    #[error("task description is empty")]
    Empty,
}

/// Top-level error type for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error(transparent)]
    InvalidTaskId(#[from] TaskIdError),

    #[error(transparent)]
    InvalidTaskName(#[from] TaskNameError),

    #[error(transparent)]
    InvalidDescription(#[from] TaskDescriptionError),

    #[error("illegal argument: no fields to update")]
    EmptyUpdate,

    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("task already exists for user: {0}")]
    AlreadyExists(String),

    #[error("access denied: task {task_id} does not belong to user {user_id}")]
    AccessDenied { task_id: TaskId, user_id: UserId },

    // Infrastructure errors
    #[error("database error: {0}")]
    DatabaseError(String),
}
