use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use task_service::config::Config;
use task_service::domain::authentication::service::AuthService;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::service::UserService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::PostgresTaskRepository;
use task_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_DB_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.ttl(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let user_service = Arc::new(UserService::new(user_repository));
    let task_service = Arc::new(TaskService::new(task_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, task_service, authenticator);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
