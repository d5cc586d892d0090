use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use unidad_config::{CorsConfig, DatabaseConfig, ServerConfig};
use unidad_db::{PgStore, init_db_pool, run_migrations};
use unidad_educativa::router::init_router;
use unidad_educativa::state::AppState;
use unidad_observability::init_tracing;

const DEFAULT_LOG_DIR: &str = "storage/logs";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    init_tracing(&log_dir)?;

    let server_config = ServerConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    if database_config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(PgStore::new(pool), cors_config);
    #[allow(unused_mut)]
    let mut app = init_router(state);

    #[cfg(feature = "observability")]
    if let Some(handle) = unidad_observability::init_metrics()? {
        app = app.route(
            "/metrics",
            axum::routing::get(move || async move { handle.render() }),
        );
    }

    let addr = server_config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
