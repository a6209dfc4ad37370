use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;
    current_user.authorize(user_id)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseData {
    pub user_id: i64,
    pub email: String,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0,
            email: user.email.as_str().to_string(),
        }
    }
}
