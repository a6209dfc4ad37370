use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskIdError;
use crate::domain::task::errors::TaskNameError;
use crate::domain::user::models::UserId;

/// Task unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(TaskId(id)),
            _ => Err(TaskIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task entity. Owned by exactly one user for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub name: TaskName,
    pub description: TaskDescription,
    pub created_at: DateTime<Utc>,
}

/// A task that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: UserId,
    pub name: TaskName,
    pub description: TaskDescription,
    pub created_at: DateTime<Utc>,
}

/// Task name value object.
///
/// Non-empty and at most 255 characters; unique per owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskName(String);

impl TaskName {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated task name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or only whitespace
    /// * `TooLong` - Name exceeds 255 characters
    pub fn new(name: String) -> Result<Self, TaskNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(TaskNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task description value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Create a new validated description.
    ///
    /// # Errors
    /// * `Empty` - Description is empty or only whitespace
    pub fn new(description: String) -> Result<Self, TaskDescriptionError> {
        if description.trim().is_empty() {
            Err(TaskDescriptionError::Empty)
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a task for the authenticated owner.
#[derive(Debug)]
pub struct CreateTaskCommand {
    pub name: TaskName,
    pub description: TaskDescription,
}

/// Command to update a task. Only provided fields change.
#[derive(Debug)]
pub struct UpdateTaskCommand {
    pub name: Option<TaskName>,
    pub description: Option<TaskDescription>,
}
