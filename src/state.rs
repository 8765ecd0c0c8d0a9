//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::{AppConfig, SiteMode};
use crate::ecs::ServiceStatusSource;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Nothing in here is mutated after start-up. `status` is only present when the
/// site runs in status mode; the router registers `/ecs-status` based on it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub status: Option<Arc<dyn ServiceStatusSource>>,
}

impl AppState {
    /// Creates a new application state from the given configuration, templates, and status source.
    pub fn new(
        config: AppConfig,
        tera: Tera,
        status: Option<Arc<dyn ServiceStatusSource>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            status,
        }
    }

    /// Site mode actually being served, derived from whether a status source is wired in.
    pub fn mode(&self) -> SiteMode {
        if self.status.is_some() {
            SiteMode::Status
        } else {
            SiteMode::Landing
        }
    }
}
