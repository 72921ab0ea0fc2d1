//! Reusable view-model components rendered by the templates.
//!
//! - `data_table` - Tabular rendering of arbitrary documents
//! - `bar_chart` - Horizontal bar chart for grouped report totals

pub mod bar_chart;
pub mod data_table;

pub use bar_chart::{Bar, BarChart};
pub use data_table::{DataTable, TableColumn, TableRow, display_value};
