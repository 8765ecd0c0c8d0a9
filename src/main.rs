//! Monarch: landing page and ECS service status server.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, builds the ECS client when running in status mode, sets up the
//! Axum router and starts the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monarch::config::{AppConfig, LogFormat, SiteMode, DEFAULT_LOG_FILTER};
use monarch::ecs::{EcsStatusClient, ServiceStatusSource};
use monarch::http::start_server;
use monarch::templates::init_templates;
use monarch::{create_router, AppState};

/// Monarch: a landing page with an optional live ECS service status panel
#[derive(Parser, Debug)]
#[command(name = "monarch", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "monarch=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Site mode, overrides config file and SITE_MODE
    #[arg(long, value_enum)]
    mode: Option<SiteMode>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration first: the log format lives in it
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let json = config.logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(mode = config.mode.as_str(), "Loaded configuration");

    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    let status: Option<Arc<dyn ServiceStatusSource>> = match config.mode {
        SiteMode::Landing => None,
        SiteMode::Status => {
            tracing::info!(
                cluster = %config.ecs.cluster,
                service = %config.ecs.service,
                region = config.ecs.region.as_deref().unwrap_or("<sdk default>"),
                "ECS status endpoint enabled"
            );
            Some(Arc::new(EcsStatusClient::from_config(&config.ecs).await))
        }
    };

    let state = AppState::new(config.clone(), tera, status);
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
