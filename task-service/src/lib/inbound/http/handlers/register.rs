use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::AuthResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    email: String,
    password: String,
    password_confirmation: String,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        RegisterCommand {
            email: request.email,
            password: request.password,
            password_confirmation: request.password_confirmation,
        }
    }
}
