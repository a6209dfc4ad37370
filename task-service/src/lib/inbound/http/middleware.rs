use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type holding the user resolved from the bearer token.
///
/// Inserted once per request by [`authenticate`]; handlers read it with
/// `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl AuthenticatedUser {
    /// Reject access to resources under another user's id.
    pub fn authorize(&self, user_id: UserId) -> Result<(), ApiError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.user_id,
                requested_user_id = %user_id,
                "Access to another user's resources denied"
            );
            Err(UserError::AccessDenied.into())
        }
    }
}

/// Reasons the gate turns a request away. All of them answer 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("authorization header required")]
    MissingHeader,

    #[error("bearer token required")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid token subject")]
    MissingSubject,

    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("user not found")]
    UserNotFound,
}

impl From<AuthRejection> for ApiError {
    fn from(rejection: AuthRejection) -> Self {
        ApiError::Unauthorized(rejection.to_string())
    }
}

/// Middleware that validates the bearer token and attaches the user it
/// belongs to. Each step either rejects with 401 or moves on to the next.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let user = resolve_user(&state, authorization.as_deref()).await.map_err(|rejection| {
        tracing::warn!(
            reason = %rejection,
            method = %req.method(),
            uri = %req.uri(),
            "Request rejected by authentication"
        );
        ApiError::from(rejection)
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

async fn resolve_user(
    state: &AppState,
    authorization: Option<&str>,
) -> Result<AuthenticatedUser, AuthRejection> {
    let header = authorization
        .filter(|value| !value.is_empty())
        .ok_or(AuthRejection::MissingHeader)?;

    let token = bearer_token(header);
    if token.is_empty() {
        return Err(AuthRejection::MissingToken);
    }

    let claims = state
        .authenticator
        .extract_claims(token)
        .map_err(|e| {
            tracing::debug!(error = %e, "Claim extraction failed");
            AuthRejection::InvalidToken
        })?;

    let subject = claims.subject().ok_or(AuthRejection::MissingSubject)?;

    if !state.authenticator.validate_token(token, subject) {
        return Err(AuthRejection::InvalidOrExpiredToken);
    }

    let user = state
        .user_service
        .get_user_by_email(subject)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Token subject does not resolve to a user");
            AuthRejection::UserNotFound
        })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email.as_str().to_string(),
    })
}

/// Token carried by an Authorization header value. Without the `Bearer `
/// prefix the whole value is taken as the token.
fn bearer_token(header: &str) -> &str {
    match header.trim() {
        "Bearer" => "",
        value => value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim(),
    }
}
