//! Core types for the E-Shop dashboard.
//!
//! This module provides type-safe wrappers for the concepts every layer shares.

pub mod action;
pub mod collection;
pub mod id;
pub mod price;

pub use action::LogAction;
pub use collection::CollectionName;
pub use id::{DocumentId, DocumentIdError};
pub use price::Price;
