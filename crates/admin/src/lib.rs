//! E-Shop Brasil data-administration dashboard.
//!
//! This crate provides the dashboard as a library so the binary, the
//! operator CLI and the live-database tests share one implementation.
//!
//! - [`db`] - `MongoDB` gateway, document and report repositories
//! - [`models`] - typed records for `products`, `users` and `logs`
//! - [`services`] - fake-data generator and single-document editor
//! - [`routes`] - axum handlers and askama page templates
//!
//! The dashboard has no authentication. Bind it to a trusted interface only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
