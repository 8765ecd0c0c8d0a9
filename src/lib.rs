//! Monarch: a landing page server with an optional live ECS status panel.
//!
//! Two deployment modes share one binary:
//! - **landing**: the landing page, static assets and `/health`
//! - **status**: additionally proxies one ECS `DescribeServices` call at
//!   `/ecs-status` and embeds a polling script in the landing page

pub mod config;
pub mod ecs;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
