//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `editor` - Select, edit and delete single documents
//! - `generator` - Synthetic pt-BR e-commerce data for an empty database

pub mod editor;
pub mod generator;

pub use editor::{FieldView, RecordEditor, SaveOutcome, ScalarKind, Selection, changed_fields};
pub use generator::{DataGenerator, SeedPlan, SeedSummary};
