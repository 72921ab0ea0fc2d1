//! Database gateway for the e-commerce `MongoDB`.
//!
//! # Database: `eshop_db` (configurable via `MONGO_DATABASE`)
//!
//! ## Collections
//!
//! - `products` - Product catalog (`nome`, `categoria`, `preco`, `estoque`)
//! - `users` - Customers (`nome`, `email`, `estado`)
//! - `logs` - User activity (`timestamp`, `user_id`, `action`, `product_id`)
//!
//! The gateway is created once at startup with [`Database::connect`], which
//! pings the server before returning. There is no reconnection logic on top of
//! what the driver does; callers receive the handle through `AppState`.

pub mod documents;
pub mod reports;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use thiserror::Error;
use tracing::instrument;

use eshop_core::{CollectionName, DocumentId, DocumentIdError};

use crate::config::DatabaseConfig;
use crate::models::{LogEntry, Product, User};

pub use documents::{DocumentRepository, LIST_LIMIT, UpdateOutcome};
pub use reports::{ActionCount, CategoryStock, ReportRepository};

/// Application name reported to the server for connection diagnostics.
const APP_NAME: &str = "eshop-admin";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver or server error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Data in the database does not have the expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The supplied identifier is not a valid document id.
    #[error("invalid document id: {0}")]
    InvalidId(#[from] DocumentIdError),

    /// Requested document was not found.
    #[error("not found")]
    NotFound,
}

/// Handle to the connected database.
///
/// Cheap to clone: the driver client is reference-counted and pools its own
/// connections.
#[derive(Clone, Debug)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Connect to the configured server and verify it answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the connection string is invalid
    /// or no server is reachable within the configured timeout.
    #[instrument(skip(config), fields(database = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let mut options = ClientOptions::parse(config.url()).await?;
        options.server_selection_timeout = Some(config.connect_timeout);
        options.connect_timeout = Some(config.connect_timeout);
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        let gateway = Self { client, database };

        gateway.ping().await?;
        tracing::info!("Connected to MongoDB");

        Ok(gateway)
    }

    /// Liveness check against the server.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the server does not respond.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Name of the selected database.
    #[must_use]
    pub fn name(&self) -> &str {
        self.database.name()
    }

    /// Untyped handle to one of the managed collections.
    #[must_use]
    pub fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.database.collection(name.as_str())
    }

    /// Typed handle to `products`.
    #[must_use]
    pub fn products(&self) -> Collection<Product> {
        self.database.collection(CollectionName::Products.as_str())
    }

    /// Typed handle to `users`.
    #[must_use]
    pub fn users(&self) -> Collection<User> {
        self.database.collection(CollectionName::Users.as_str())
    }

    /// Typed handle to `logs`.
    #[must_use]
    pub fn logs(&self) -> Collection<LogEntry> {
        self.database.collection(CollectionName::Logs.as_str())
    }

    /// Drop the whole database. Only used to clean up throwaway test databases.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the server rejects the command.
    pub async fn drop_database(&self) -> Result<(), RepositoryError> {
        self.database.drop().await?;
        Ok(())
    }

    /// Shut down the driver's background tasks.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// Convert a parsed dashboard id into the driver's id type.
#[must_use]
pub const fn object_id(id: &DocumentId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

/// Convert a driver id into the dashboard's id type.
#[must_use]
pub const fn document_id(oid: &ObjectId) -> DocumentId {
    DocumentId::from_bytes(oid.bytes())
}
