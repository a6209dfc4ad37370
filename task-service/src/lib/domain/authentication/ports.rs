use async_trait::async_trait;

use super::errors::AuthError;
use super::models::AuthSession;
use super::models::LoginCommand;
use super::models::RegisterCommand;

/// Port for login and registration.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and issue a bearer token whose subject is the email.
    ///
    /// # Errors
    /// * `IllegalArgument` - Email or password is empty
    /// * `InvalidCredentials` - No such user, or the password does not match
    /// * `Token` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Create an account and issue a bearer token for it.
    ///
    /// # Errors
    /// * `IllegalArgument` - A field is empty
    /// * `InvalidPassword` - Password and confirmation differ
    /// * `InvalidEmail` - Email is malformed
    /// * `User(EmailAlreadyExists)` - Email is already registered
    /// * `Password` / `Token` - Hashing or token generation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;
}
