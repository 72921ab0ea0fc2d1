//! Overview page and the fake-data generator trigger.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::instrument;

use eshop_core::CollectionName;

use super::{Notice, Sidebar, notices_from_query};
use crate::db::DocumentRepository;
use crate::error::{AppError, render};
use crate::services::{DataGenerator, SeedPlan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    pub notice: Option<String>,
}

/// Document count of one collection.
#[derive(Debug, Clone)]
pub struct CollectionCountView {
    pub name: &'static str,
    pub count: String,
}

/// Overview page template.
#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub sidebar: Sidebar,
    pub notices: Vec<Notice>,
    pub counts: Vec<CollectionCountView>,
    pub plan: SeedPlan,
}

/// Overview page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Response, AppError> {
    let notices = notices_from_query(query.notice.as_deref());
    Ok(render_overview(&state, notices).await?.into_response())
}

/// Insert one batch of fake products, users and logs.
#[instrument(skip(state))]
pub async fn generate(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut rng = StdRng::from_os_rng();

    match DataGenerator::new(state.db())
        .seed(SeedPlan::default(), &mut rng)
        .await
    {
        Ok(summary) => {
            tracing::info!(
                products = summary.products,
                users = summary.users,
                logs = summary.logs,
                "Fake data generated"
            );
            Ok(Redirect::to("/?notice=generated").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate fake data");
            let notices = vec![Notice::error(format!("Failed to generate data: {e}"))];
            Ok(render_overview(&state, notices).await?.into_response())
        }
    }
}

async fn render_overview(
    state: &AppState,
    mut notices: Vec<Notice>,
) -> Result<Html<String>, AppError> {
    let documents = DocumentRepository::new(state.db());

    let mut counts = Vec::with_capacity(CollectionName::ALL.len());
    for collection in CollectionName::ALL {
        let count = match documents.count(collection).await {
            Ok(n) => n.to_string(),
            Err(e) => {
                tracing::error!(%collection, error = %e, "Failed to count documents");
                notices.push(Notice::error(format!("Failed to count {collection}: {e}")));
                "?".to_string()
            }
        };
        counts.push(CollectionCountView {
            name: collection.as_str(),
            count,
        });
    }

    render(&OverviewTemplate {
        sidebar: Sidebar::load(state, "/").await,
        notices,
        counts,
        plan: SeedPlan::default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shows_counts_and_unreachable_status() {
        let page = OverviewTemplate {
            sidebar: Sidebar::new("/", "eshop_db", false),
            notices: Vec::new(),
            counts: vec![CollectionCountView {
                name: "products",
                count: "?".to_string(),
            }],
            plan: SeedPlan::default(),
        }
        .render()
        .unwrap();

        assert!(page.contains("MongoDB unreachable · eshop_db"));
        assert!(page.contains("<code>eshop_db</code>"));
        assert!(page.contains("Inserts 50 products, 100 users and 1000 activity logs"));
    }
}
