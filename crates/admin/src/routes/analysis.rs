//! Big-Data Analysis view: the two aggregation reports.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::instrument;

use super::{Notice, Sidebar};
use crate::components::BarChart;
use crate::db::{ActionCount, CategoryStock, ReportRepository, RepositoryError};
use crate::error::{AppError, render};
use crate::state::AppState;

/// Which report to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    StockByCategory,
    ActionsByType,
}

impl ReportKind {
    pub const ALL: [Self; 2] = [Self::StockByCategory, Self::ActionsByType];

    /// Value of the `report` query parameter.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::StockByCategory => "stock",
            Self::ActionsByType => "actions",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::StockByCategory => "Stock by category",
            Self::ActionsByType => "User actions by type",
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock" => Ok(Self::StockByCategory),
            "actions" => Ok(Self::ActionsByType),
            _ => Err(format!("unknown report: {s}")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub report: Option<String>,
}

/// Report picker button.
#[derive(Debug, Clone)]
pub struct ReportLink {
    pub param: &'static str,
    pub title: &'static str,
    pub active: bool,
}

/// A computed report: chart plus backing table.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub title: &'static str,
    pub chart: BarChart,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportView {
    #[must_use]
    pub fn stock_by_category(rows: &[CategoryStock]) -> Self {
        Self {
            title: ReportKind::StockByCategory.title(),
            chart: BarChart::new(
                "category",
                "total_stock",
                rows.iter().map(|r| (r.category.clone(), r.total_stock)),
            ),
            columns: vec!["category", "total_products", "total_stock"],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.category.clone(),
                        r.total_products.to_string(),
                        r.total_stock.to_string(),
                    ]
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn actions_by_type(rows: &[ActionCount]) -> Self {
        Self {
            title: ReportKind::ActionsByType.title(),
            chart: BarChart::new(
                "action",
                "count",
                rows.iter().map(|r| (r.action.clone(), r.count)),
            ),
            columns: vec!["action", "count"],
            rows: rows
                .iter()
                .map(|r| vec![r.action.clone(), r.count.to_string()])
                .collect(),
        }
    }
}

/// Analysis page template.
#[derive(Template)]
#[template(path = "analysis.html")]
pub struct AnalysisTemplate {
    pub sidebar: Sidebar,
    pub notices: Vec<Notice>,
    pub reports: Vec<ReportLink>,
    pub report: Option<ReportView>,
}

/// Analysis page handler. A report only runs when one is requested.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Html<String>, AppError> {
    let kind = query
        .report
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(str::parse::<ReportKind>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let mut notices = Vec::new();
    let report = match kind {
        Some(kind) => match run_report(&state, kind).await {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::error!(report = kind.param(), error = %e, "Failed to run report");
                notices.push(Notice::error(format!("Failed to run report: {e}")));
                None
            }
        },
        None => None,
    };

    render(&AnalysisTemplate {
        sidebar: Sidebar::load(&state, "/analysis").await,
        notices,
        reports: ReportKind::ALL
            .iter()
            .map(|k| ReportLink {
                param: k.param(),
                title: k.title(),
                active: Some(*k) == kind,
            })
            .collect(),
        report,
    })
}

async fn run_report(state: &AppState, kind: ReportKind) -> Result<ReportView, RepositoryError> {
    let reports = ReportRepository::new(state.db());
    match kind {
        ReportKind::StockByCategory => Ok(ReportView::stock_by_category(
            &reports.stock_by_category().await?,
        )),
        ReportKind::ActionsByType => Ok(ReportView::actions_by_type(
            &reports.actions_by_type().await?,
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_param_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.param().parse::<ReportKind>().unwrap(), kind);
        }
        assert!("sales".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_stock_report_view() {
        let rows = vec![
            CategoryStock {
                category: "Casa".to_string(),
                total_products: 3,
                total_stock: 300,
            },
            CategoryStock {
                category: "Livros".to_string(),
                total_products: 1,
                total_stock: 75,
            },
        ];

        let view = ReportView::stock_by_category(&rows);
        assert_eq!(view.rows[1], vec!["Livros", "1", "75"]);
        assert_eq!(view.chart.bars[0].width, "100.0%");
        assert_eq!(view.chart.bars[1].width, "25.0%");
    }

    #[test]
    fn test_page_renders_chart_and_table() {
        let rows = vec![ActionCount {
            action: "checkout".to_string(),
            count: 42,
        }];
        let page = AnalysisTemplate {
            sidebar: Sidebar::new("/analysis", "eshop_test", true),
            notices: Vec::new(),
            reports: Vec::new(),
            report: Some(ReportView::actions_by_type(&rows)),
        }
        .render()
        .unwrap();

        assert!(page.contains("User actions by type"));
        assert!(page.contains("width: 100.0%"));
        assert!(page.contains("<td>42</td>"));
    }

    #[test]
    fn test_empty_report_renders_no_data_note() {
        let page = AnalysisTemplate {
            sidebar: Sidebar::new("/analysis", "eshop_test", true),
            notices: Vec::new(),
            reports: Vec::new(),
            report: Some(ReportView::stock_by_category(&[])),
        }
        .render()
        .unwrap();

        assert!(page.contains("No data."));
        assert!(page.contains("Connected to MongoDB"));
    }

    #[test]
    fn test_empty_actions_report() {
        let view = ReportView::actions_by_type(&[]);
        assert!(view.chart.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.columns, vec!["action", "count"]);
    }
}
