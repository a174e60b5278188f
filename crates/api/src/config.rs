//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8080)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Connection pool size (default: 5)
//! - `DATABASE_CONNECT_TIMEOUT_SECONDS`: Deadline for opening a connection (default: 10)
//! - `LOG_LEVEL`: Logging filter, e.g. "debug" or "college_db=debug,info" (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins; unset or "*" allows any
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request deadline (default: 30)

use eyre::{Result, WrapErr};
use std::{env, time::Duration};

/// Configuration for the college records API server.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use college_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    pub database_max_connections: u32,

    pub database_connect_timeout: Duration,

    /// Filter directive handed to the tracing subscriber
    pub log_level: String,

    /// CORS allowed origins; `None` allows any origin
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {name} value")),
        _ => Ok(default),
    }
}

/// Splits a comma-separated origin list. An empty list or a lone `*` means
/// any origin.
pub fn parse_cors_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        None
    } else {
        Some(origins)
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric setting is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_or("API_PORT", 8080u16)?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 5u32)?;
        let database_connect_timeout =
            Duration::from_secs(parse_or("DATABASE_CONNECT_TIMEOUT_SECONDS", 10u64)?);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .and_then(|origins| parse_cors_origins(&origins));

        let request_timeout = parse_or("API_REQUEST_TIMEOUT_SECONDS", 30u64)?;

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            database_connect_timeout,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string, e.g. "0.0.0.0:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wildcard_or_empty_origins_allow_any() {
        assert_eq!(parse_cors_origins("*"), None);
        assert_eq!(parse_cors_origins(" , "), None);
    }

    #[test]
    fn splits_origin_list() {
        assert_eq!(
            parse_cors_origins("http://localhost:3000, https://college.example"),
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://college.example".to_string()
            ])
        );
    }
}
