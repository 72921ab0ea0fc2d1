//! Tagged union over the managed collections' documents.

use mongodb::bson::Document;

use eshop_core::CollectionName;

use super::{LogEntry, Product, User};

/// A document from one of the managed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Product(Product),
    User(User),
    LogEntry(LogEntry),
    /// The document does not match its collection's model (for example a
    /// numeric field that was overwritten with text). Kept as-is.
    Unrecognized { document: Document, reason: String },
}

impl Record {
    /// Decode a document fetched from `collection`.
    #[must_use]
    pub fn decode(collection: CollectionName, document: Document) -> Self {
        let decoded = match collection {
            CollectionName::Products => Product::from_document(document.clone()).map(Self::Product),
            CollectionName::Users => User::from_document(document.clone()).map(Self::User),
            CollectionName::Logs => LogEntry::from_document(document.clone()).map(Self::LogEntry),
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!(%collection, error = %e, "Document does not match collection model");
            Self::Unrecognized {
                document,
                reason: e.to_string(),
            }
        })
    }

    /// Short type label for display.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Product(_) => "Product",
            Self::User(_) => "User",
            Self::LogEntry(_) => "Log entry",
            Self::Unrecognized { .. } => "Unrecognized document",
        }
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Product(p) => format!(
                "{} ({}) · {} · {} in stock",
                p.name,
                p.category,
                p.price.display(),
                p.stock
            ),
            Self::User(u) => format!("{} <{}> · {}", u.name, u.email, u.state),
            Self::LogEntry(l) => format!(
                "{} at {} · user {} · product {}",
                l.action,
                l.recorded_at().map_or_else(
                    || l.timestamp.to_string(),
                    |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()
                ),
                l.user_id.to_hex(),
                l.product_id.to_hex()
            ),
            Self::Unrecognized { reason, .. } => reason.clone(),
        }
    }
}
