//! Integration tests for the E-Shop Brasil dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a local MongoDB
//! docker run -d -p 27017:27017 mongo:7
//!
//! # Run the live tests
//! cargo test -p eshop-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `generator` - fake-data generation against a real server
//! - `documents` - select, edit and delete
//! - `reports` - aggregation invariants
//! - `dashboard_http` - HTTP round trips against a running dashboard
//!
//! Database tests run in a throwaway database named `eshop_test_<random>`
//! on the server from `MONGO_URL`, dropped again by [`TestContext::cleanup`].

use rand::Rng;

use eshop_admin::config::DatabaseConfig;
use eshop_admin::db::{Database, RepositoryError};

/// A connection to a fresh, uniquely named database.
pub struct TestContext {
    pub db: Database,
}

impl TestContext {
    /// Connect to `MONGO_URL` and select a new random database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if no server is reachable.
    pub async fn new() -> Result<Self, RepositoryError> {
        let suffix: u64 = rand::rng().random();
        let config =
            DatabaseConfig::from_env().with_database_name(format!("eshop_test_{suffix:016x}"));

        let db = Database::connect(&config).await?;
        Ok(Self { db })
    }

    /// Drop the test database and close the client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the drop fails.
    pub async fn cleanup(self) -> Result<(), RepositoryError> {
        self.db.drop_database().await?;
        self.db.shutdown().await;
        Ok(())
    }
}

/// Base URL of a running dashboard (configurable via `ADMIN_BASE_URL`).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:8501".to_string())
}
