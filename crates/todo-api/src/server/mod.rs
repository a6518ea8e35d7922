//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use todo_common::{AppConfig, AppError, JwtService};
use todo_db::{create_pool, run_migrations, PgTodoRepository, PgUserRepository};
use todo_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, state.config());
    router.with_state(state)
}

/// Connect to the database, apply migrations, and wire the services
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = todo_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let todo_repo = Arc::new(PgTodoRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .todo_repo(todo_repo)
        .jwt_service(jwt_service)
        .build()?;

    Ok(AppState::new(service_context, config, pool))
}

/// Serve the application on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(anyhow!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(anyhow!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
