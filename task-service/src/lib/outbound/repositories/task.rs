use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskName;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

const NAME_PER_USER_UNIQUE_CONSTRAINT: &str = "tasks_user_id_name_key";

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_task(row: PgRow) -> Result<Task, TaskError> {
        Ok(Task {
            id: TaskId(row.get("id")),
            user_id: UserId(row.get("user_id")),
            name: TaskName::new(row.get("name"))?,
            description: TaskDescription::new(row.get("description"))?,
            created_at: row.get("created_at"),
        })
    }

    fn map_write_error(e: sqlx::Error, name: &TaskName) -> TaskError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(NAME_PER_USER_UNIQUE_CONSTRAINT)
            {
                return TaskError::AlreadyExists(name.to_string());
            }
        }
        TaskError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let row = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(task.user_id.0)
        .bind(task.name.as_str())
        .bind(task.description.as_str())
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &task.name))?;

        Ok(Task {
            id: TaskId(row.get("id")),
            user_id: task.user_id,
            name: task.name,
            description: task.description,
            created_at: task.created_at,
        })
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_task).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_task).collect()
    }

    async fn find_by_user_and_name(
        &self,
        user_id: UserId,
        name: &TaskName,
    ) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM tasks
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id.0)
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_task).transpose()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(task.id.0)
        .bind(task.name.as_str())
        .bind(task.description.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &task.name))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id));
        }

        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
