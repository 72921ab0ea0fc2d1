//! Data table component types.
//!
//! Documents in a collection do not share a fixed schema, so the table's
//! columns are the union of all field names in first-seen order. Every cell
//! is pre-rendered to a display string.

use std::collections::HashSet;

use chrono::DateTime;
use mongodb::bson::{Bson, Document};
use serde::Serialize;

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    /// Field name.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a column whose label is the field name itself.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Hex id of the document, empty if it has none.
    pub id: String,
    /// Display strings, one per column.
    pub cells: Vec<String>,
}

/// A table of documents ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DataTable {
    /// Unique table identifier (used as the HTML id).
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Rows in store order.
    pub rows: Vec<TableRow>,
    /// Title for empty state.
    pub empty_title: String,
}

impl DataTable {
    /// Build a table from documents.
    #[must_use]
    pub fn from_documents(table_id: &str, documents: &[Document]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for key in documents.iter().flat_map(Document::keys) {
            if seen.insert(key.as_str()) {
                columns.push(TableColumn::new(key));
            }
        }

        let rows = documents
            .iter()
            .map(|document| TableRow {
                id: document
                    .get_object_id("_id")
                    .map(|oid| oid.to_hex())
                    .unwrap_or_default(),
                cells: columns
                    .iter()
                    .map(|c| document.get(&c.key).map(display_value).unwrap_or_default())
                    .collect(),
            })
            .collect();

        Self {
            table_id: table_id.to_string(),
            columns,
            rows,
            empty_title: "No documents found".to_string(),
        }
    }

    /// Set empty state title.
    #[must_use]
    pub fn empty_state(mut self, title: &str) -> Self {
        self.empty_title = title.to_string();
        self
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of all rows that have one, in row order.
    #[must_use]
    pub fn row_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| !r.id.is_empty())
            .map(|r| r.id.clone())
            .collect()
    }
}

/// Render a BSON value as a display string.
#[must_use]
pub fn display_value(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) => n.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => String::new(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()).map_or_else(
            || dt.to_string(),
            |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        other => other.to_string(),
    }
}
