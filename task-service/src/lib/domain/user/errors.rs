use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error(transparent)]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("user not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("access denied")]
    AccessDenied,

    // Infrastructure errors
    #[error("database error: {0}")]
    DatabaseError(String),
}

