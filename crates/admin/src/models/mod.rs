//! Domain models for the three managed collections.
//!
//! Documents are schema-less, so each collection gets a serde-mapped record
//! for the fields the dashboard knows about plus a flattened `extra` bag
//! holding everything else. Stored field names are Portuguese (`nome`,
//! `preco`, ...) and renamed onto English Rust fields.
//!
//! A document that does not fit its model is not an error for the UI: see
//! [`Record::Unrecognized`].

pub mod log_entry;
pub mod product;
pub mod record;
pub mod user;

use mongodb::bson;
use thiserror::Error;

pub use log_entry::LogEntry;
pub use product::Product;
pub use record::Record;
pub use user::User;

/// A document does not have the shape its collection's model expects.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Missing field, wrong BSON type or unknown enum value.
    #[error(transparent)]
    Decode(#[from] bson::de::Error),

    /// The field decoded but its value is out of range.
    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}
