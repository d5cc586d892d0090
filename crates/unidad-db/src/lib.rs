//! # Unidad DB
//!
//! Persistence layer for the Unidad Educativa API.
//!
//! - [`init_db_pool`] / [`run_migrations`]: PostgreSQL pool and embedded
//!   SQLx migrations.
//! - [`repository`]: the generic [`Repository`] contract, the per-entity
//!   lookup traits and the [`Store`] handle services receive.
//! - [`PgStore`]: the PostgreSQL implementation.
//! - `MemoryStore` (feature `test-utils`): in-process tables for tests.
//!
//! # Example
//!
//! ```ignore
//! use unidad_config::DatabaseConfig;
//! use unidad_db::{PgStore, init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod pg;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use pg::PgStore;
pub use repository::{
    AsignaturaRepository, AsistenciaRepository, CalificacionRepository, CursoRepository,
    DocenteRepository, EstudianteRepository, MatriculaRepository, Repository,
    RepresentanteRepository, Store,
};
pub use sqlx::PgPool;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use unidad_config::DatabaseConfig;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool sized from `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
