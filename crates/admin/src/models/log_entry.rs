//! User activity log entries.
//!
//! `user_id` and `product_id` pointed at existing documents when the entry was
//! generated. Nothing keeps them valid afterwards: deleting a user or product
//! leaves dangling references, which the dashboard tolerates.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use eshop_core::LogAction;

use super::ShapeError;

/// An entry in the `logs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Stored as a BSON date-time.
    pub timestamp: bson::DateTime,
    pub user_id: ObjectId,
    pub action: LogAction,
    pub product_id: ObjectId,
    #[serde(flatten)]
    pub extra: Document,
}

impl LogEntry {
    /// Decode a stored document.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if a known field is missing, has the wrong type,
    /// or `action` is not one of the known actions.
    pub fn from_document(document: Document) -> Result<Self, ShapeError> {
        Ok(bson::from_document(document)?)
    }

    /// The timestamp as a chrono value, `None` if out of chrono's range.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp.timestamp_millis())
    }
}
