//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Push notification gateway configuration.
    #[serde(default)]
    pub push: PushSettings,
    /// Summary trend cache configuration.
    #[serde(default)]
    pub summary: SummarySettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604800 // 7 days
}

/// Push notification gateway configuration.
///
/// When `endpoint` is empty the gateway is disabled and events are
/// dropped after a debug log line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushSettings {
    /// HTTP endpoint events are POSTed to.
    #[serde(default)]
    pub endpoint: String,
    /// Application key sent with each event.
    #[serde(default)]
    pub app_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_push_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_push_timeout_ms() -> u64 {
    2000
}

/// Summary trend cache configuration.
///
/// The previous emergency fund figures live for one hour; the last
/// reported direction for three. Both are display conveniences.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarySettings {
    /// Time-to-live for the previous figures, in seconds.
    #[serde(default = "default_figures_ttl")]
    pub figures_ttl_secs: u64,
    /// Time-to-live for the last-direction flag, in seconds.
    #[serde(default = "default_direction_ttl")]
    pub direction_ttl_secs: u64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            figures_ttl_secs: default_figures_ttl(),
            direction_ttl_secs: default_direction_ttl(),
        }
    }
}

fn default_figures_ttl() -> u64 {
    3600
}

fn default_direction_ttl() -> u64 {
    10800
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GASTO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
