use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;
    current_user.authorize(user_id)?;
    let Json(body) = body?;

    state
        .user_service
        .change_password(&user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
    new_password_confirmation: String,
}

impl From<ChangePasswordRequest> for ChangePasswordCommand {
    fn from(request: ChangePasswordRequest) -> Self {
        ChangePasswordCommand {
            current_password: request.current_password,
            new_password: request.new_password,
            new_password_confirmation: request.new_password_confirmation,
        }
    }
}
