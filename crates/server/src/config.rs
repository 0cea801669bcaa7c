//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `SERVER_PORT` - Listen port (default: 8000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g., production)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_owned()))?
            .into();

        let host = parse_host(std::env::var("SERVER_HOST").ok().as_deref())?;
        let port = parse_port(std::env::var("SERVER_PORT").ok().as_deref())?;

        Ok(Self {
            database_url,
            host,
            port,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_host(value: Option<&str>) -> Result<IpAddr, ConfigError> {
    let raw = value.unwrap_or(DEFAULT_HOST);
    raw.parse()
        .map_err(|_| ConfigError::InvalidEnvVar("SERVER_HOST".to_owned(), raw.to_owned()))
}

fn parse_port(value: Option<&str>) -> Result<u16, ConfigError> {
    match value {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar("SERVER_PORT".to_owned(), raw.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_default() {
        assert_eq!(
            parse_host(None).expect("default host"),
            DEFAULT_HOST.parse::<IpAddr>().expect("valid default")
        );
    }

    #[test]
    fn test_parse_host_explicit() {
        assert_eq!(
            parse_host(Some("0.0.0.0")).expect("valid host"),
            "0.0.0.0".parse::<IpAddr>().expect("valid")
        );
        assert!(parse_host(Some("not-an-ip")).is_err());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None).expect("default port"), DEFAULT_PORT);
        assert_eq!(parse_port(Some("3000")).expect("valid port"), 3000);
        assert!(parse_port(Some("sixty")).is_err());
        assert!(parse_port(Some("70000")).is_err());
    }
}
