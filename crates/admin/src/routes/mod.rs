//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                           - Liveness check
//! GET  /health/ready                     - Readiness check (database ping)
//!
//! # Overview
//! GET  /                                 - Collection counts, generate button
//! POST /generate                         - Insert fake data
//!
//! # Manage Data
//! GET  /manage                           - Table, id selector and editor
//! POST /manage/{collection}/{id}         - Save changed fields
//! POST /manage/{collection}/{id}/delete  - Delete one document
//!
//! # Big-Data Analysis
//! GET  /analysis?report=stock|actions    - Aggregation reports
//! ```
//!
//! Every mutation answers with a redirect so the browser re-reads the view.

pub mod analysis;
pub mod manage;
pub mod overview;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Build the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Overview
        .route("/", get(overview::index))
        .route("/generate", post(overview::generate))
        // Manage Data
        .route("/manage", get(manage::index))
        .route("/manage/{collection}/{id}", post(manage::save))
        .route("/manage/{collection}/{id}/delete", post(manage::delete))
        // Big-Data Analysis
        .route("/analysis", get(analysis::index))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database does not answer a ping.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.db().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

// =============================================================================
// Page Chrome
// =============================================================================

/// Sidebar navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 3] = [
    ("/", "Overview"),
    ("/manage", "Manage Data"),
    ("/analysis", "Big-Data Analysis"),
];

/// The three sidebar entries with `current_path` marked active.
#[must_use]
pub fn nav(current_path: &str) -> Vec<NavItem> {
    NAV.iter()
        .map(|&(href, label)| NavItem {
            href,
            label,
            active: href == current_path,
        })
        .collect()
}

/// Sidebar contents: navigation plus the database connection status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub items: Vec<NavItem>,
    pub database: String,
    pub connected: bool,
}

impl Sidebar {
    #[must_use]
    pub fn new(current_path: &str, database: impl Into<String>, connected: bool) -> Self {
        Self {
            items: nav(current_path),
            database: database.into(),
            connected,
        }
    }

    /// Sidebar for `current_path`. The status line reflects a fresh ping, the
    /// same check `/health/ready` makes.
    pub async fn load(state: &AppState, current_path: &str) -> Self {
        let connected = match state.db().ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed while rendering sidebar");
                false
            }
        };
        Self::new(current_path, state.db().name(), connected)
    }
}

/// Banner severity, used as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A banner shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.level.css_class()
    }

    /// Banner for a `?notice=` code set by a redirect after a mutation.
    /// Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let notice = match code {
            "generated" => Self::success("Fake data generated."),
            "saved" => Self::success("Changes saved."),
            "unchanged" => Self::info("No field changed, nothing was saved."),
            "deleted" => Self::success("Document deleted."),
            "missing" => Self::warning(NOT_FOUND_MESSAGE),
            _ => return None,
        };
        Some(notice)
    }
}

/// Shown when a selected document no longer exists.
pub const NOT_FOUND_MESSAGE: &str = "Document not found, it may have been deleted.";

/// Banners decoded from an optional `?notice=` parameter.
fn notices_from_query(code: Option<&str>) -> Vec<Notice> {
    code.and_then(Notice::from_code).into_iter().collect()
}
