//! Configuration loading and constants.
//!
//! Configuration is resolved in layers: built-in defaults, an optional TOML file,
//! then environment variables. CLI flags are applied on top by `main`. This module
//! also defines the Cache-Control header values used per route group and the
//! default paths and strings. `AppConfig` is the root configuration struct.

use std::path::Path;
use std::str::FromStr;

use const_format::formatcp;
use serde::{Deserialize, Serialize};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Values are in seconds. The status and health endpoints are never cached so
// every poll reaches the upstream API.

/// Landing page - content only changes on redeploy
pub const HTTP_CACHE_HOME_MAX_AGE: u32 = 60;
pub const HTTP_CACHE_HOME_SWR: u32 = 30;

/// Static assets - file names are not content-hashed, so no immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 3600;

pub const CACHE_CONTROL_HOME: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}",
    HTTP_CACHE_HOME_MAX_AGE,
    HTTP_CACHE_HOME_SWR
);

pub const CACHE_CONTROL_STATIC: &str = formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Routes
// =============================================================================

/// Path of the ECS status proxy endpoint
pub const STATUS_PATH: &str = "/ecs-status";

/// URL prefix the static directory is mounted under
pub const STATIC_URL_PREFIX: &str = "/static";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_SITE_MODE: &str = "SITE_MODE";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_CLUSTER_NAME: &str = "ECS_CLUSTER_NAME";
pub const ENV_SERVICE_NAME: &str = "ECS_SERVICE_NAME";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 80;

/// Directory for static files
pub const DEFAULT_STATIC_DIR: &str = "public";

pub const DEFAULT_CLUSTER_NAME: &str = "default";
pub const DEFAULT_SERVICE_NAME: &str = "monarch-express-service";

pub const DEFAULT_SITE_NAME: &str = "Monarch";
pub const DEFAULT_HERO_IMAGE: &str = "monarch.svg";

/// Seconds between client-side status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Largest poll interval whose millisecond value still fits a browser timer
/// delay (a signed 32-bit integer). Larger delays fire immediately.
pub const MAX_POLL_INTERVAL_SECS: u64 = i32::MAX as u64 / 1000;

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "monarch=info,tower_http=info";

/// Which variant of the site this process serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SiteMode {
    /// Landing page, static assets and health check only
    #[default]
    Landing,
    /// Landing page plus the live ECS status panel and `/ecs-status` proxy
    Status,
}

impl SiteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteMode::Landing => "landing",
            SiteMode::Status => "status",
        }
    }
}

impl FromStr for SiteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landing" => Ok(SiteMode::Landing),
            "status" => Ok(SiteMode::Status),
            other => Err(ConfigError::Validation(format!(
                "Unknown site mode '{}', expected 'landing' or 'status'",
                other
            ))),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which site variant to serve
    pub mode: SiteMode,
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// ECS service to report on (status mode)
    pub ecs: EcsConfig,
    pub ui: UiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

/// Target of the status lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// AWS region. When unset the SDK's default provider chain decides.
    pub region: Option<String>,
    pub cluster: String,
    pub service: String,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            region: None,
            cluster: DEFAULT_CLUSTER_NAME.to_string(),
            service: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Page title
    pub site_name: String,
    /// File name of the hero image inside the static directory
    pub hero_image: String,
    /// Seconds between status polls in the browser
    pub poll_interval_secs: u64,
    /// Version string, populated at runtime
    #[serde(skip_deserializing)]
    pub version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            hero_image: DEFAULT_HERO_IMAGE.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UiConfig {
    /// URL of the hero image as referenced from the page
    pub fn hero_image_url(&self) -> String {
        format!("{}/{}", STATIC_URL_PREFIX, self.hero_image)
    }

    /// Poll interval in milliseconds for the page script, capped at the
    /// largest delay browsers honour.
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_secs
            .min(MAX_POLL_INTERVAL_SECS)
            .saturating_mul(1000)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Parse a TOML configuration file. Missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup function. Empty values are
    /// treated as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "{} must be a port number, got '{}'",
                    ENV_PORT, port
                ))
            })?;
        }
        if let Some(dir) = get(ENV_STATIC_DIR) {
            self.http.static_dir = dir;
        }
        if let Some(mode) = get(ENV_SITE_MODE) {
            self.mode = mode.parse()?;
        }
        if let Some(region) = get(ENV_AWS_REGION) {
            self.ecs.region = Some(region);
        }
        if let Some(cluster) = get(ENV_CLUSTER_NAME) {
            self.ecs.cluster = cluster;
        }
        if let Some(service) = get(ENV_SERVICE_NAME) {
            self.ecs.service = service;
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.ui.poll_interval_secs > MAX_POLL_INTERVAL_SECS {
            return Err(ConfigError::Validation(format!(
                "ui.poll_interval_secs must be at most {}, got {}",
                MAX_POLL_INTERVAL_SECS, self.ui.poll_interval_secs
            )));
        }
        if self.ecs.cluster.trim().is_empty() || self.ecs.service.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ecs.cluster and ecs.service must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_unset() {
        let config = AppConfig::default().with_env(|_| None).unwrap();
        assert_eq!(config.ecs.cluster, "default");
        assert_eq!(config.ecs.service, "monarch-express-service");
        assert_eq!(config.http.port, 80);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.ecs.region, None);
        assert_eq!(config.mode, SiteMode::Landing);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.ui.poll_interval_secs, 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_env(env_from(&[
                ("PORT", "8080"),
                ("AWS_REGION", "eu-west-1"),
                ("ECS_CLUSTER_NAME", "prod"),
                ("ECS_SERVICE_NAME", "web"),
                ("SITE_MODE", "Status"),
                ("LOG_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.ecs.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.ecs.cluster, "prod");
        assert_eq!(config.ecs.service, "web");
        assert_eq!(config.mode, SiteMode::Status);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = AppConfig::default()
            .with_env(env_from(&[("PORT", ""), ("ECS_CLUSTER_NAME", "  ")]))
            .unwrap();
        assert_eq!(config.http.port, 80);
        assert_eq!(config.ecs.cluster, "default");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = AppConfig::default()
            .with_env(env_from(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = AppConfig::default()
            .with_env(env_from(&[("SITE_MODE", "dashboard")]))
            .unwrap_err();
        assert!(err.to_string().contains("dashboard"));
    }

    #[test]
    fn test_partial_toml_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
mode = "status"

[http]
port = 3000

[ecs]
cluster = "staging"
region = "us-east-2"

[ui]
site_name = "Butterfly"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode, SiteMode::Status);
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.ecs.cluster, "staging");
        assert_eq!(config.ecs.service, DEFAULT_SERVICE_NAME);
        assert_eq!(config.ecs.region.as_deref(), Some("us-east-2"));
        assert_eq!(config.ui.site_name, "Butterfly");
        assert_eq!(config.ui.hero_image, DEFAULT_HERO_IMAGE);
        assert_eq!(config.ui.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_env_wins_over_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ecs]\nservice = \"from-file\"").unwrap();

        let config = AppConfig::from_file(file.path())
            .unwrap()
            .with_env(env_from(&[("ECS_SERVICE_NAME", "from-env")]))
            .unwrap();
        assert_eq!(config.ecs.service, "from-env");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\npoll_interval_secs = 0").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_oversized_poll_interval_rejected() {
        for secs in [MAX_POLL_INTERVAL_SECS + 1, 3_000_000, i64::MAX as u64] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[ui]\npoll_interval_secs = {}", secs).unwrap();

            let err = AppConfig::from_file(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "accepted {}", secs);
        }
    }

    #[test]
    fn test_largest_poll_interval_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\npoll_interval_secs = {}", MAX_POLL_INTERVAL_SECS).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(config.ui.poll_interval_ms() <= i32::MAX as u64);
    }

    #[test]
    fn test_poll_interval_ms_never_overflows() {
        let ui = UiConfig {
            poll_interval_secs: u64::MAX,
            ..UiConfig::default()
        };
        assert_eq!(ui.poll_interval_ms(), MAX_POLL_INTERVAL_SECS * 1000);
        assert_eq!(UiConfig::default().poll_interval_ms(), 30_000);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http\nport = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file("/nonexistent/monarch.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_shipped_sample_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = AppConfig::from_file(path).unwrap();
        assert_eq!(config.mode, SiteMode::Landing);
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(config.ecs.service, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn test_hero_image_url() {
        let ui = UiConfig::default();
        assert_eq!(ui.hero_image_url(), "/static/monarch.svg");
    }

    #[test]
    fn test_cache_control_values() {
        assert_eq!(
            CACHE_CONTROL_HOME,
            "public, max-age=60, stale-while-revalidate=30"
        );
        assert_eq!(CACHE_CONTROL_STATIC, "public, max-age=3600");
    }
}
