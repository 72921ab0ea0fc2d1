//! Print the aggregation reports.

use eshop_admin::db::{Database, ReportRepository, RepositoryError};

/// Products and stock grouped by category, highest stock first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the aggregation fails.
pub async fn stock(db: &Database) -> Result<(), RepositoryError> {
    let rows = ReportRepository::new(db).stock_by_category().await?;
    if rows.is_empty() {
        tracing::info!("No products");
        return Ok(());
    }

    tracing::info!("{:<20} {:>14} {:>12}", "category", "total_products", "total_stock");
    for row in &rows {
        tracing::info!(
            "{:<20} {:>14} {:>12}",
            row.category,
            row.total_products,
            row.total_stock
        );
    }
    Ok(())
}

/// Log entries counted by action, most frequent first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the aggregation fails.
pub async fn actions(db: &Database) -> Result<(), RepositoryError> {
    let rows = ReportRepository::new(db).actions_by_type().await?;
    if rows.is_empty() {
        tracing::info!("No log entries");
        return Ok(());
    }

    tracing::info!("{:<16} {:>8}", "action", "count");
    for row in &rows {
        tracing::info!("{:<16} {:>8}", row.action, row.count);
    }
    Ok(())
}
