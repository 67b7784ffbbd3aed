//! Common utilities shared by the EBookStore services.
//!
//! This crate provides:
//! - Layered configuration loading and validation
//! - Structured logging setup
//! - Retry with exponential backoff for outbound calls

pub mod config;
pub mod retry;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    AppConfig, ConnectionStrings, DatabaseConfig, Environment, ExternalBooksConfig, JwtSettings,
    ServerConfig, TelemetryConfig,
};
pub use retry::{retry_if, RetryPolicy};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
