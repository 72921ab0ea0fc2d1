//! Document counts per collection.

use eshop_core::CollectionName;

use eshop_admin::db::{Database, DocumentRepository, RepositoryError};

/// Print how many documents each managed collection holds.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a count fails.
pub async fn run(db: &Database) -> Result<(), RepositoryError> {
    let documents = DocumentRepository::new(db);

    tracing::info!(database = db.name(), "Collection counts");
    for collection in CollectionName::ALL {
        let count = documents.count(collection).await?;
        tracing::info!("{:<10} {:>8}", collection.as_str(), count);
    }
    Ok(())
}
