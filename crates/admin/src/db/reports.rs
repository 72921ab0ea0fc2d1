//! Fixed aggregation reports for the Big-Data Analysis view.
//!
//! Two hardcoded `$group`/`$sort` pipelines, recomputed on every request.
//! They group on the stored field names (`categoria`, `estoque`, `action`)
//! and name their totals the same way the stored data does.

use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;
use tracing::instrument;

use super::{Database, RepositoryError};

/// Label used for a group whose key is missing or null.
pub const MISSING_KEY_LABEL: &str = "(none)";

/// One row of the stock-by-category report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStock {
    pub category: String,
    pub total_products: i64,
    pub total_stock: i64,
}

/// One row of the actions-by-type report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionCount {
    pub action: String,
    pub count: i64,
}

/// Pipeline grouping products by category with count and summed stock,
/// sorted by summed stock descending.
#[must_use]
pub fn stock_by_category_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$categoria",
                "total_produtos": { "$sum": 1 },
                "estoque_total": { "$sum": "$estoque" },
            }
        },
        doc! { "$sort": { "estoque_total": -1 } },
    ]
}

/// Pipeline counting logs per action, sorted by count descending.
#[must_use]
pub fn actions_by_type_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$action",
                "contagem": { "$sum": 1 },
            }
        },
        doc! { "$sort": { "contagem": -1 } },
    ]
}

impl CategoryStock {
    /// Decode one `$group` output row.
    fn from_group(row: &Document) -> Self {
        Self {
            category: group_key(row),
            total_products: numeric_field(row, "total_produtos"),
            total_stock: numeric_field(row, "estoque_total"),
        }
    }
}

impl ActionCount {
    fn from_group(row: &Document) -> Self {
        Self {
            action: group_key(row),
            count: numeric_field(row, "contagem"),
        }
    }
}

/// Render a group's `_id` as a label.
fn group_key(row: &Document) -> String {
    match row.get("_id") {
        None | Some(Bson::Null) => MISSING_KEY_LABEL.to_string(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read an accumulated total. `$sum` yields int32, int64 or double depending
/// on its inputs; doubles are truncated since every total here counts units.
#[allow(clippy::cast_possible_truncation)]
fn numeric_field(row: &Document, key: &str) -> i64 {
    match row.get(key) {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        _ => 0,
    }
}

/// Repository for the aggregation reports.
pub struct ReportRepository<'a> {
    db: &'a Database,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Products and stock grouped by category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregation fails.
    #[instrument(skip(self))]
    pub async fn stock_by_category(&self) -> Result<Vec<CategoryStock>, RepositoryError> {
        let rows: Vec<Document> = self
            .db
            .products()
            .aggregate(stock_by_category_pipeline())
            .await?
            .try_collect()
            .await?;

        Ok(rows.iter().map(CategoryStock::from_group).collect())
    }

    /// Log entries counted by action.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregation fails.
    #[instrument(skip(self))]
    pub async fn actions_by_type(&self) -> Result<Vec<ActionCount>, RepositoryError> {
        let rows: Vec<Document> = self
            .db
            .logs()
            .aggregate(actions_by_type_pipeline())
            .await?
            .try_collect()
            .await?;

        Ok(rows.iter().map(ActionCount::from_group).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_pipeline_shape() {
        let pipeline = stock_by_category_pipeline();
        assert_eq!(pipeline.len(), 2);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$categoria");
        assert_eq!(
            group.get_document("estoque_total").unwrap(),
            &doc! { "$sum": "$estoque" }
        );

        let sort = pipeline[1].get_document("$sort").unwrap();
        assert_eq!(sort.get_i32("estoque_total").unwrap(), -1);
    }

    #[test]
    fn test_actions_pipeline_shape() {
        let pipeline = actions_by_type_pipeline();
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$action");
        assert_eq!(
            pipeline[1].get_document("$sort").unwrap(),
            &doc! { "contagem": -1 }
        );
    }

    #[test]
    fn test_category_stock_decodes_mixed_numeric_types() {
        let row = doc! { "_id": "Eletrônicos", "total_produtos": 4_i32, "estoque_total": 350_i64 };
        assert_eq!(
            CategoryStock::from_group(&row),
            CategoryStock {
                category: "Eletrônicos".to_string(),
                total_products: 4,
                total_stock: 350,
            }
        );

        let row = doc! { "_id": "Livros", "total_produtos": 1, "estoque_total": 12.0 };
        assert_eq!(CategoryStock::from_group(&row).total_stock, 12);
    }

    #[test]
    fn test_null_group_key_uses_placeholder() {
        let row = doc! { "_id": Bson::Null, "contagem": 3 };
        let decoded = ActionCount::from_group(&row);
        assert_eq!(decoded.action, MISSING_KEY_LABEL);
        assert_eq!(decoded.count, 3);
    }

    #[test]
    fn test_non_string_group_key_is_displayed() {
        let row = doc! { "_id": 42, "contagem": 1 };
        assert_eq!(ActionCount::from_group(&row).action, "42");
    }
}
