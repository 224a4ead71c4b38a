//! Environment-driven configuration with validation.
//!
//! All required values must be present or the process refuses to start;
//! optional timeouts and retry budgets fall back to documented defaults.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_RETRIES: u32 = 3;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: String, reason: String },

    /// Invalid socket address
    #[error("Invalid socket address for {field}: {reason}")]
    InvalidAddress { field: String, reason: String },

    /// Invalid timeout value
    #[error("Invalid timeout for {0}: must be greater than 0")]
    InvalidTimeout(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError { name: String, reason: String },
}

/// Deployment environment, selects the logging format and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Developer workstation: pretty logs, debug level
    Local,
    /// Shared dev environment: JSON logs, debug level
    Dev,
    /// Production: JSON logs, info level
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Connection parameters for one backend service.
///
/// Immutable after construction; one instance per backend, owned by the
/// adapter it configures.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend target address
    pub target: Url,
    /// Deadline applied to each individual call attempt
    pub timeout: Duration,
    /// Additional attempts beyond the first for retryable failures
    pub retries: u32,
}

/// Gateway configuration, constructed once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment
    pub env: Environment,
    /// HTTP bind address
    pub http_address: SocketAddr,
    /// Inbound request deadline
    pub http_timeout: Duration,
    /// user-service connection parameters
    pub user: BackendConfig,
    /// order-service connection parameters
    pub order: BackendConfig,
    /// product-service connection parameters
    pub product: BackendConfig,
}

impl Config {
    /// Loads configuration from environment variables with validation.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is absent or any value
    /// fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self {
            env: parse_required("ENV")?,
            http_address: parse_address_env("HTTP_ADDRESS")?,
            http_timeout: parse_timeout_env("HTTP_TIMEOUT_MS")?,
            user: backend_from_env("USER_ADDR", "USER_TIMEOUT_MS", "USER_RETRIES")?,
            order: backend_from_env("ORDER_ADDR", "ORDER_TIMEOUT_MS", "ORDER_RETRIES")?,
            product: backend_from_env("PRODUCT_ADDR", "PRODUCT_TIMEOUT_MS", "PRODUCT_RETRIES")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("HTTP_TIMEOUT_MS".to_string()));
        }
        for (name, backend) in [
            ("USER_TIMEOUT_MS", &self.user),
            ("ORDER_TIMEOUT_MS", &self.order),
            ("PRODUCT_TIMEOUT_MS", &self.product),
        ] {
            if backend.timeout.is_zero() {
                return Err(ConfigError::InvalidTimeout(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Assemble one backend's connection parameters from its three variables.
fn backend_from_env(
    addr_var: &str,
    timeout_var: &str,
    retries_var: &str,
) -> Result<BackendConfig, ConfigError> {
    Ok(BackendConfig {
        target: parse_url_env(addr_var)?,
        timeout: parse_timeout_env(timeout_var)?,
        retries: parse_env(retries_var, DEFAULT_RETRIES)?,
    })
}

/// Parse a required environment variable.
fn parse_required<T: FromStr>(name: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    let value = env::var(name).map_err(|_| ConfigError::MissingRequired(name.to_string()))?;
    value.parse().map_err(|e: T::Err| ConfigError::ParseError {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an environment variable with a default value.
fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a required socket address environment variable.
fn parse_address_env(name: &str) -> Result<SocketAddr, ConfigError> {
    let addr = env::var(name).map_err(|_| ConfigError::MissingRequired(name.to_string()))?;
    addr.parse().map_err(|e: std::net::AddrParseError| {
        ConfigError::InvalidAddress {
            field: name.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parse a required URL environment variable.
fn parse_url_env(name: &str) -> Result<Url, ConfigError> {
    let url_str = env::var(name).map_err(|_| ConfigError::MissingRequired(name.to_string()))?;
    Url::parse(&url_str).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a millisecond timeout with the shared default.
fn parse_timeout_env(name: &str) -> Result<Duration, ConfigError> {
    let ms = parse_env(name, DEFAULT_TIMEOUT_MS)?;
    Ok(Duration::from_millis(ms))
}
