//! E-Shop Core - Shared domain types.
//!
//! This crate provides the types shared by the dashboard and the operator CLI:
//! - `admin` - Web dashboard over the `products`, `users` and `logs` collections
//! - `cli` - Command-line tools for seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database driver, no HTTP.
//! Conversions to driver types (e.g. `ObjectId`) live in the admin crate.
//!
//! # Modules
//!
//! - [`types`] - Document ids, collection names, log actions and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
