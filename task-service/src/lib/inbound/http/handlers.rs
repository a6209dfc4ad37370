use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::task::errors::TaskError;
use crate::user::errors::UserError;

pub mod change_password;
pub mod delete_user;
pub mod get_user;
pub mod login;
pub mod register;
pub mod tasks;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("illegal argument: {}", rejection.body_text()))
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::IllegalArgument(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::AccessDenied => ApiError::Forbidden(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::IllegalArgument(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_)
            | AuthError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) => {
                ApiError::InternalServerError(err.to_string())
            }
            AuthError::User(err) => ApiError::from(err),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidTaskId(_)
            | TaskError::InvalidTaskName(_)
            | TaskError::InvalidDescription(_)
            | TaskError::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            TaskError::AccessDenied { .. } => ApiError::Forbidden(err.to_string()),
            TaskError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Envelope shared by every response: `{statusCode, statusMessage, data, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    status_message: String,
    data: Option<T>,
    error: Option<ApiErrorData>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            status_message: status_message(status_code),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            status_message: status_message(status_code),
            data: None,
            error: Some(ApiErrorData { message }),
        }
    }
}

fn status_message(status_code: StatusCode) -> String {
    status_code
        .canonical_reason()
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
