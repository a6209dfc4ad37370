use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .login(body.into())
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// Missing fields decode as empty strings and are rejected by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl From<LoginRequest> for LoginCommand {
    fn from(request: LoginRequest) -> Self {
        LoginCommand {
            email: request.email,
            password: request.password,
        }
    }
}

/// Returned by both login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub user_id: i64,
    pub email: String,
    pub jwt_token: String,
}

impl From<AuthSession> for AuthResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            user_id: session.user_id.0,
            email: session.email,
            jwt_token: session.token,
        }
    }
}
