//! HTTP route handlers.
//!
//! Routes are grouped by caching behaviour, with a Cache-Control header per
//! group. The landing page and static assets are cacheable; the status and
//! health endpoints are `no-store` so every poll reflects the live service.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod status;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware,
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    CACHE_CONTROL_HOME, CACHE_CONTROL_NO_STORE, CACHE_CONTROL_STATIC, STATIC_URL_PREFIX,
    STATUS_PATH,
};
use crate::http::static_files::create_static_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

use status::StatusState;

/// Creates the Axum router with all routes and cache headers.
///
/// `/ecs-status` is only registered when the state carries a status source;
/// otherwise requests to it fall through to the default 404.
pub fn create_router(state: AppState) -> Router {
    let home_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HOME),
        ),
    );

    let static_routes = Router::new()
        .nest_service(
            STATIC_URL_PREFIX,
            create_static_service(&state.config.http.static_dir),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    let mut live_routes = Router::new().route("/health", get(health::health));
    if let Some(source) = state.status.clone() {
        let status_state = StatusState {
            source,
            ecs: state.config.ecs.clone(),
        };
        live_routes = live_routes.merge(
            Router::new()
                .route(STATUS_PATH, get(status::ecs_status))
                .with_state(status_state),
        );
    }
    let live_routes = live_routes.layer(SetResponseHeaderLayer::overriding(
        CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
    ));

    Router::new()
        .merge(home_routes)
        .merge(live_routes)
        .merge(static_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
