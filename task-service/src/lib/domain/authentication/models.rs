use crate::domain::user::models::UserId;

/// Credentials submitted to log in.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Credentials submitted to open a new account.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Outcome of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub email: String,
    pub token: String,
}
