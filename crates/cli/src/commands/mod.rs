//! Command implementations.

pub mod report;
pub mod seed;
pub mod stats;

use eshop_admin::config::DatabaseConfig;
use eshop_admin::db::{Database, RepositoryError};

/// Connect using `MONGO_URL` / `MONGO_DATABASE` (a `.env` file is honoured).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the server cannot be reached.
pub async fn connect() -> Result<Database, RepositoryError> {
    let config = DatabaseConfig::from_env();
    tracing::info!(database = %config.name, "Connecting to MongoDB...");
    Database::connect(&config).await
}
