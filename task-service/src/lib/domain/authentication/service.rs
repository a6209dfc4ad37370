use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use super::errors::AuthError;
use super::models::AuthSession;
use super::models::LoginCommand;
use super::models::RegisterCommand;
use super::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Login and registration on top of the user directory.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        if command.email.is_empty() || command.password.is_empty() {
            return Err(AuthError::IllegalArgument(
                "email and password are required".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(email = %command.email, "Login for unknown email");
                AuthError::InvalidCredentials
            })?;

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.email.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::warn!(user_id = %user.id, error = %err, "Stored password hash is unreadable");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AuthError::Token(err),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            user_id: user.id,
            email: user.email.as_str().to_string(),
            token: result.access_token,
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if command.email.is_empty()
            || command.password.is_empty()
            || command.password_confirmation.is_empty()
        {
            return Err(AuthError::IllegalArgument(
                "email, password and password confirmation are required".to_string(),
            ));
        }

        if command.password != command.password_confirmation {
            return Err(AuthError::InvalidPassword(
                "password and confirmation do not match".to_string(),
            ));
        }

        let email = EmailAddress::new(command.email)?;

        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(email.to_string()).into());
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        // The unique index on email still rejects a concurrent registration.
        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        let token = self.authenticator.issue_token(user.email.as_str())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthSession {
            user_id: user.id,
            email: user.email.as_str().to_string(),
            token,
        })
    }
}
