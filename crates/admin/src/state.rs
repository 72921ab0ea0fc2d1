//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::Database;

/// Application state shared across all handlers.
///
/// Holds the single database gateway created at startup. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    db: Database,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, db: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, db }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }
}
