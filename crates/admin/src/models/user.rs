//! Customer records.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use super::ShapeError;

/// A customer in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    /// Two-letter state code (UF), e.g. `SP`.
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(flatten)]
    pub extra: Document,
}

impl User {
    /// Decode a stored document.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if a known field is missing or not a string.
    pub fn from_document(document: Document) -> Result<Self, ShapeError> {
        Ok(bson::from_document(document)?)
    }
}
