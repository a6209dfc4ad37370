use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::tasks::create_task;
use super::handlers::tasks::delete_task;
use super::handlers::tasks::get_task;
use super::handlers::tasks::list_tasks;
use super::handlers::tasks::update_task;
use super::middleware::authenticate;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state. Services sit behind their ports so any
/// implementation can be mounted.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    task_service: Arc<dyn TaskServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        task_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register));

    let protected_routes = Router::new()
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id/password", put(change_password))
        .route("/api/v1/users/:user_id/delete", post(delete_user))
        .route(
            "/api/v1/users/:user_id/tasks",
            get(list_tasks).post(create_task),
        )
        .route(
            "/api/v1/users/:user_id/tasks/:task_id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
