use async_trait::async_trait;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::DeleteUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Replace the password of an existing user after re-checking the current one.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `IllegalArgument` - A field is empty
    /// * `InvalidPassword` - New password and confirmation differ
    /// * `InvalidCredentials` - Current password does not match
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<User, UserError>;

    /// Delete a user account and, with it, all of its tasks.
    ///
    /// # Errors
    /// * `IllegalArgument` - A field is empty
    /// * `InvalidCredentials` - Email or password does not match the account
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId, command: DeleteUserCommand)
        -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its store-assigned identifier
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage, cascading to the user's tasks.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
