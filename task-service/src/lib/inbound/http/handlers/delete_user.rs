use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::DeleteUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Deletes the account (and its tasks) after re-checking email and password.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    body: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;
    current_user.authorize(user_id)?;
    let Json(body) = body?;

    state
        .user_service
        .delete_user(&user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteUserRequest {
    email: String,
    current_password: String,
}

impl From<DeleteUserRequest> for DeleteUserCommand {
    fn from(request: DeleteUserRequest) -> Self {
        DeleteUserCommand {
            email: request.email,
            current_password: request.current_password,
        }
    }
}
