//! Landing page handler.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::config::STATUS_PATH;
use crate::error::AppError;
use crate::state::AppState;
use crate::templates::page_template;

/// Landing page. In status mode the page also carries the polling script.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ui = &state.config.ui;

    let mut context = tera::Context::new();
    context.insert("config", ui);
    context.insert("hero_image_url", &ui.hero_image_url());
    context.insert("status_path", STATUS_PATH);
    context.insert("poll_interval_ms", &ui.poll_interval_ms());

    let html = state.tera.render(page_template(state.mode()), &context)?;
    Ok(Html(html))
}
