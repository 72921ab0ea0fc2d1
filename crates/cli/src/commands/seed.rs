//! Insert a batch of fake data.

use rand::SeedableRng;
use rand::rngs::StdRng;

use eshop_admin::db::{Database, RepositoryError};
use eshop_admin::services::{DataGenerator, SeedPlan, SeedSummary};

/// Generate and insert one batch.
///
/// # Errors
///
/// Returns `RepositoryError` if an insert fails. Collections written before
/// the failure keep their documents.
pub async fn run(db: &Database, plan: SeedPlan) -> Result<SeedSummary, RepositoryError> {
    tracing::info!(
        products = plan.products,
        users = plan.users,
        logs = plan.logs,
        "Generating fake data"
    );

    let mut rng = StdRng::from_os_rng();
    let summary = DataGenerator::new(db).seed(plan, &mut rng).await?;

    tracing::info!("Inserted {} products", summary.products);
    tracing::info!("Inserted {} users", summary.users);
    tracing::info!("Inserted {} logs", summary.logs);

    Ok(summary)
}
