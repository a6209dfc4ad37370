use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;

/// Error for login and registration
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("token error: {0}")]
    Token(#[from] JwtError),

    #[error(transparent)]
    User(#[from] UserError),
}
