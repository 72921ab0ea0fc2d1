//! Product catalog entries.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use eshop_core::Price;

use super::ShapeError;

/// A product in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned id, `None` before insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    /// Stored as a double.
    #[serde(rename = "preco")]
    pub price: Price,
    /// Units in stock, never negative.
    #[serde(rename = "estoque")]
    pub stock: i32,
    /// Fields the model does not know about.
    #[serde(flatten)]
    pub extra: Document,
}

impl Product {
    /// Decode a stored document.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError` if a known field is missing, has the wrong type,
    /// or stock is negative.
    pub fn from_document(document: Document) -> Result<Self, ShapeError> {
        let product: Self = bson::from_document(document)?;
        if product.stock < 0 {
            return Err(ShapeError::Invalid {
                field: "estoque",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(product)
    }
}
