//! Generic document operations backing the Manage Data view.
//!
//! Everything here works on raw [`Document`]s so the browser can show and
//! edit whatever fields a document carries, known or not.

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use tracing::instrument;

use eshop_core::{CollectionName, DocumentId};

use super::{Database, RepositoryError, object_id};

/// Maximum number of documents the browser lists.
pub const LIST_LIMIT: i64 = 1000;

/// Result of a field-level update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matched by the id filter (0 or 1).
    pub matched: u64,
    /// Documents actually changed (0 when the new values equal the old ones).
    pub modified: u64,
}

/// Repository for single-document reads and writes.
pub struct DocumentRepository<'a> {
    db: &'a Database,
}

impl<'a> DocumentRepository<'a> {
    /// Create a new document repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List up to `limit` documents in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        collection: CollectionName,
        limit: i64,
    ) -> Result<Vec<Document>, RepositoryError> {
        let cursor = self
            .db
            .collection(collection)
            .find(doc! {})
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Fetch one document by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn find_by_id(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<Option<Document>, RepositoryError> {
        let document = self
            .db
            .collection(collection)
            .find_one(doc! { "_id": object_id(id) })
            .await?;

        Ok(document)
    }

    /// Delete exactly one document by id.
    ///
    /// Returns the number of deleted documents; deleting an id that no longer
    /// exists succeeds with `0`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_by_id(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<u64, RepositoryError> {
        let result = self
            .db
            .collection(collection)
            .delete_one(doc! { "_id": object_id(id) })
            .await?;

        tracing::info!(deleted = result.deleted_count, "Document delete executed");
        Ok(result.deleted_count)
    }

    /// Apply a `$set` of the given fields to one document.
    ///
    /// An empty field set issues no write. `_id` is stripped before sending,
    /// it is immutable. Last write wins: a concurrent save of the same field
    /// silently overwrites this one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, changes), fields(id = %id, field_count = changes.len()))]
    pub async fn set_fields(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        mut changes: Document,
    ) -> Result<UpdateOutcome, RepositoryError> {
        changes.remove("_id");
        if changes.is_empty() {
            return Ok(UpdateOutcome::default());
        }

        let result = self
            .db
            .collection(collection)
            .update_one(doc! { "_id": object_id(id) }, doc! { "$set": changes })
            .await?;

        tracing::info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Document update executed"
        );

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Count all documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the count fails.
    pub async fn count(&self, collection: CollectionName) -> Result<u64, RepositoryError> {
        Ok(self
            .db
            .collection(collection)
            .count_documents(doc! {})
            .await?)
    }

    /// Fetch every document id in a collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn ids(&self, collection: CollectionName) -> Result<Vec<ObjectId>, RepositoryError> {
        let cursor = self
            .db
            .collection(collection)
            .find(doc! {})
            .projection(doc! { "_id": 1 })
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents
            .iter()
            .filter_map(|d| d.get_object_id("_id").ok())
            .collect())
    }
}
