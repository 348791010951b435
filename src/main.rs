//! Payment transaction service - main application entry point.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. With `DATABASE_URL`: create the pool and run migrations; without it,
//!    fall back to the in-memory store
//! 3. Build the HTTP router
//! 4. Serve on the configured port

use std::sync::Arc;

use pagamento_service::{
    AppState, config, create_app, db,
    repository::{InMemoryTransacaoRepository, PgTransacaoRepository},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            AppState::new(Arc::new(PgTransacaoRepository::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, transactions are kept in memory only");
            AppState::new(Arc::new(InMemoryTransacaoRepository::new()))
        }
    };

    let app = create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
