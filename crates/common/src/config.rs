//! Configuration management for the application.
//!
//! Settings are loaded once at startup into an immutable [`AppConfig`] that is
//! then handed to every component that needs it. Sources are layered, later
//! ones overriding earlier ones:
//!
//! 1. `config/default.toml` (optional)
//! 2. `config/{environment}.toml` (optional, environment from `APP_ENV`)
//! 3. Environment variables prefixed with `APP_`, using `__` between sections
//!
//! ## Example Configuration
//!
//! ```toml
//! [connection_strings]
//! default_connection = "postgres://localhost:5432/ebookstore"
//!
//! [jwt_settings]
//! key = "a-signing-key-of-at-least-thirty-two-bytes"
//! issuer = "https://ebookstore.local"
//! audience = "ebookstore-clients"
//! ```
//!
//! The same key from the environment: `APP_JWT_SETTINGS__KEY=...`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Minimum HMAC key length for HS256 (256 bits)
pub const MIN_JWT_KEY_BYTES: usize = 32;

/// Connection string schemes the persistence layer understands
pub const SUPPORTED_DATABASE_SCHEMES: [&str; 3] = ["postgres://", "postgresql://", "memory://"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Named connection strings
    pub connection_strings: ConnectionStrings,

    /// Bearer token validation settings
    pub jwt_settings: JwtSettings,

    /// Connection pool tuning
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Outbound book catalogue client
    #[serde(default)]
    pub external_books: ExternalBooksConfig,

    /// Runtime environment, taken from `APP_ENV` rather than the files
    #[serde(skip)]
    pub environment: Environment,
}

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local development; enables the API documentation endpoints
    Development,
    /// Pre-production
    Staging,
    /// Production (the default when `APP_ENV` is unset)
    #[default]
    Production,
}

impl Environment {
    /// Read `APP_ENV`, defaulting to production
    pub fn from_env() -> Result<Self> {
        match std::env::var("APP_ENV") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::Production),
        }
    }

    /// Whether development-only features may be enabled
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Lower-case name, also used as the per-environment file name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => anyhow::bail!(
                "Unknown environment '{}'. Must be one of: development, staging, production",
                other
            ),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public HTTPS port; plaintext requests are redirected here when set
    #[serde(default)]
    pub https_port: Option<u16>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            https_port: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Named connection strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStrings {
    /// Connection string for the relational store
    pub default_connection: String,
}

/// JWT bearer validation settings
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// Symmetric HMAC signing key
    pub key: String,

    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    pub audience: String,

    /// Tolerated clock skew when checking `exp` / `nbf`
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: u64,

    /// Lifetime of tokens issued by this service
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_minutes: u64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .field("token_lifetime_minutes", &self.token_lifetime_minutes)
            .finish()
    }
}

/// Connection pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connections kept open while idle
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Timeout for acquiring a connection, in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Acquire timeout as a Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to log output
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

/// External book catalogue client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalBooksConfig {
    /// Base URL of the catalogue API
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_catalog_timeout")]
    pub timeout_seconds: u64,

    /// Retries for transient failures
    #[serde(default = "default_catalog_retries")]
    pub max_retries: u32,
}

impl Default for ExternalBooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_seconds: default_catalog_timeout(),
            max_retries: default_catalog_retries(),
        }
    }
}

impl ExternalBooksConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_clock_skew() -> u64 {
    60
}

fn default_token_lifetime() -> u64 {
    60
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_service_name() -> String {
    "ebookstore-api".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_catalog_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_catalog_timeout() -> u64 {
    10
}

fn default_catalog_retries() -> u32 {
    2
}

impl AppConfig {
    /// Load configuration for the environment named by `APP_ENV` from the
    /// `config/` directory and `APP_`-prefixed environment variables.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ebookstore_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}", config.server_address());
    /// ```
    pub fn load() -> Result<Self> {
        let environment = Environment::from_env()?;
        let source = Self::sources(environment, Path::new("config"))
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(environment, source)
    }

    /// Layered configuration sources for `environment`, rooted at `dir`.
    pub fn sources(
        environment: Environment,
        dir: &Path,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(environment.as_str())).required(false))
            // Example: APP_JWT_SETTINGS__KEY=...
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
    }

    /// Deserialize and validate an already-built configuration.
    pub fn from_config(environment: Environment, source: config::Config) -> Result<Self> {
        let mut app_config: AppConfig = source
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app_config.environment = environment;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        let connection = self.connection_strings.default_connection.trim();
        if connection.is_empty() {
            anyhow::bail!("ConnectionStrings:DefaultConnection is required");
        }

        if !SUPPORTED_DATABASE_SCHEMES
            .iter()
            .any(|scheme| connection.starts_with(scheme))
        {
            anyhow::bail!(
                "Unsupported connection string. Must start with one of: {}",
                SUPPORTED_DATABASE_SCHEMES.join(", ")
            );
        }

        if self.jwt_settings.key.is_empty() {
            anyhow::bail!("JwtSettings:Key is required");
        }

        if self.jwt_settings.key.len() < MIN_JWT_KEY_BYTES {
            anyhow::bail!(
                "JwtSettings:Key must be at least {} bytes long",
                MIN_JWT_KEY_BYTES
            );
        }

        if self.jwt_settings.issuer.trim().is_empty() {
            anyhow::bail!("JwtSettings:Issuer is required");
        }

        if self.jwt_settings.audience.trim().is_empty() {
            anyhow::bail!("JwtSettings:Audience is required");
        }

        if self.jwt_settings.token_lifetime_minutes == 0 {
            anyhow::bail!("JwtSettings:TokenLifetimeMinutes must be greater than 0");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database pool size must be greater than 0");
        }

        if self.external_books.timeout_seconds == 0 {
            anyhow::bail!("External catalogue timeout must be greater than 0");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Get request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Create a development configuration backed by the in-memory store
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                ..ServerConfig::default()
            },
            connection_strings: ConnectionStrings {
                default_connection: "memory://ebookstore".to_string(),
            },
            jwt_settings: JwtSettings {
                key: "development-signing-key-minimum-32-bytes".to_string(),
                issuer: "https://localhost/ebookstore".to_string(),
                audience: "ebookstore-api".to_string(),
                clock_skew_seconds: default_clock_skew(),
                token_lifetime_minutes: default_token_lifetime(),
            },
            database: DatabaseConfig::default(),
            telemetry: TelemetryConfig {
                log_level: "debug".to_string(),
                ..TelemetryConfig::default()
            },
            external_books: ExternalBooksConfig::default(),
            environment: Environment::Development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .set_override("connection_strings.default_connection", "memory://test")
            .unwrap()
            .set_override("jwt_settings.issuer", "test-issuer")
            .unwrap()
            .set_override("jwt_settings.audience", "test-audience")
            .unwrap()
    }

    #[test]
    fn test_complete_configuration_loads() {
        let source = base_builder()
            .set_override("jwt_settings.key", "k".repeat(32))
            .unwrap()
            .build()
            .unwrap();

        let config = AppConfig::from_config(Environment::Production, source).unwrap();
        assert_eq!(config.jwt_settings.issuer, "test-issuer");
        assert_eq!(config.jwt_settings.clock_skew_seconds, 60);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_missing_jwt_key_fails() {
        let source = base_builder().build().unwrap();
        let err = AppConfig::from_config(Environment::Production, source).unwrap_err();
        assert!(format!("{:#}", err).contains("key"));
    }

    #[test]
    fn test_empty_jwt_key_fails() {
        let source = base_builder()
            .set_override("jwt_settings.key", "")
            .unwrap()
            .build()
            .unwrap();
        let err = AppConfig::from_config(Environment::Production, source).unwrap_err();
        assert!(err.to_string().contains("JwtSettings:Key is required"));
    }

    #[test]
    fn test_short_jwt_key_fails() {
        let mut config = AppConfig::development();
        config.jwt_settings.key = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_connection_string_fails() {
        let mut config = AppConfig::development();
        config.connection_strings.default_connection = "Server=.;Database=EBookStore".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_fails() {
        let mut config = AppConfig::development();
        config.telemetry.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_development_config_is_valid() {
        assert!(AppConfig::development().validate().is_ok());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AppConfig::development();
        let debug = format!("{:?}", config.jwt_settings);
        assert!(!debug.contains(&config.jwt_settings.key));
        assert!(debug.contains("<redacted>"));
    }
}
