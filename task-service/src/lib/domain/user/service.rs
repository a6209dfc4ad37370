use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::DeleteUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    fn check_password(&self, user: &User, password: &str) -> Result<(), UserError> {
        match self.password_hasher.matches(password, &user.password_hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(UserError::InvalidCredentials),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(UserError::InvalidCredentials)
            }
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<User, UserError> {
        if command.current_password.is_empty()
            || command.new_password.is_empty()
            || command.new_password_confirmation.is_empty()
        {
            return Err(UserError::IllegalArgument(
                "current password, new password and confirmation are required".to_string(),
            ));
        }

        if command.new_password != command.new_password_confirmation {
            return Err(UserError::InvalidPassword(
                "new password and confirmation do not match".to_string(),
            ));
        }

        let mut user = self.find_existing(id).await?;
        self.check_password(&user, &command.current_password)?;

        user.password_hash = self.password_hasher.hash(&command.new_password)?;

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "Password changed");

        Ok(updated_user)
    }

    async fn delete_user(
        &self,
        id: &UserId,
        command: DeleteUserCommand,
    ) -> Result<(), UserError> {
        if command.email.is_empty() || command.current_password.is_empty() {
            return Err(UserError::IllegalArgument(
                "email and current password are required".to_string(),
            ));
        }

        let user = self.find_existing(id).await?;
        if user.email.as_str() != command.email {
            return Err(UserError::InvalidCredentials);
        }
        self.check_password(&user, &command.current_password)?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn stored_user(id: i64, email: &str, password: &str) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(7, "test@example.com", "pw123");
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(7))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository));

        let user = service.get_user(&UserId(7)).await.unwrap();
        assert_eq!(user.id, UserId(7));
        assert_eq!(user.email.as_str(), "test@example.com");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId(99)).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "ghost@example.com")
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user_by_email("ghost@example.com").await;
        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(1, "test@example.com", "old_password");
        let old_hash = user.password_hash.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update()
            .withf(move |user| user.password_hash != old_hash)
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = ChangePasswordCommand {
            current_password: "old_password".to_string(),
            new_password: "new_password".to_string(),
            new_password_confirmation: "new_password".to_string(),
        };

        let updated = service.change_password(&UserId(1), command).await.unwrap();
        assert!(auth::PasswordHasher::new()
            .matches("new_password", &updated.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(1, "test@example.com", "old_password");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = ChangePasswordCommand {
            current_password: "not_it".to_string(),
            new_password: "new_password".to_string(),
            new_password_confirmation: "new_password".to_string(),
        };

        let result = service.change_password(&UserId(1), command).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_confirmation_mismatch() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = ChangePasswordCommand {
            current_password: "old_password".to_string(),
            new_password: "new_password".to_string(),
            new_password_confirmation: "other_password".to_string(),
        };

        let result = service.change_password(&UserId(1), command).await;
        assert!(matches!(result, Err(UserError::InvalidPassword(_))));
    }

    #[tokio::test]
    async fn test_change_password_empty_fields() {
        let repository = MockTestUserRepository::new();
        let service = UserService::new(Arc::new(repository));

        let command = ChangePasswordCommand {
            current_password: String::new(),
            new_password: "new_password".to_string(),
            new_password_confirmation: "new_password".to_string(),
        };

        let result = service.change_password(&UserId(1), command).await;
        assert!(matches!(result, Err(UserError::IllegalArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(3, "test@example.com", "pw123");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_delete()
            .withf(|id| *id == UserId(3))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        let command = DeleteUserCommand {
            email: "test@example.com".to_string(),
            current_password: "pw123".to_string(),
        };

        assert!(service.delete_user(&UserId(3), command).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_email_mismatch() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(3, "test@example.com", "pw123");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_delete().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = DeleteUserCommand {
            email: "other@example.com".to_string(),
            current_password: "pw123".to_string(),
        };

        let result = service.delete_user(&UserId(3), command).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = DeleteUserCommand {
            email: "test@example.com".to_string(),
            current_password: "pw123".to_string(),
        };

        let result = service.delete_user(&UserId(3), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
