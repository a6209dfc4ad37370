use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.get("id")),
            email: EmailAddress::new(row.get("email"))?,
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
        })
    }

    fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                return UserError::EmailAlreadyExists(email.to_string());
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &user.email))?;

        Ok(User {
            id: UserId(row.get("id")),
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        // tasks.user_id is ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
