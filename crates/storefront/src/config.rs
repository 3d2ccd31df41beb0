//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` marks cookies secure
//!   (default: <http://localhost:3000>)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_STORAGE_QUOTA_BYTES` - Size limit of one stored value (default: 5 MiB)
//! - `STOREFRONT_TOAST_MS` - How long notifications stay on screen (default: 2500)
//! - `STOREFRONT_SESSION_CAPACITY` - Most visitor sessions kept in memory (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_TOAST_MS: u32 = 2500;
const DEFAULT_SESSION_CAPACITY: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Largest value a visitor's storage area accepts, in bytes
    pub storage_quota_bytes: usize,
    /// Notification display time in milliseconds
    pub toast_ms: u32,
    /// Session store size; the least recently used sessions are evicted
    pub session_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/storefront/static"),
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            toast_ms: DEFAULT_TOAST_MS,
            session_capacity: DEFAULT_SESSION_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not
    /// parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_quota_bytes = parse_or(
            &lookup,
            "STOREFRONT_STORAGE_QUOTA_BYTES",
            defaults.storage_quota_bytes,
        )?;
        if storage_quota_bytes == 0 {
            return Err(invalid("STOREFRONT_STORAGE_QUOTA_BYTES", "must be positive"));
        }

        let toast_ms = parse_or(&lookup, "STOREFRONT_TOAST_MS", defaults.toast_ms)?;
        if toast_ms == 0 {
            return Err(invalid("STOREFRONT_TOAST_MS", "must be positive"));
        }

        let session_capacity = parse_or(
            &lookup,
            "STOREFRONT_SESSION_CAPACITY",
            defaults.session_capacity,
        )?;
        if session_capacity == 0 {
            return Err(invalid("STOREFRONT_SESSION_CAPACITY", "must be positive"));
        }

        let sentry_sample_rate = parse_rate(
            &lookup,
            "SENTRY_SAMPLE_RATE",
            defaults.sentry_sample_rate,
        )?;
        let sentry_traces_sample_rate = parse_rate(
            &lookup,
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            host: parse_or(&lookup, "STOREFRONT_HOST", defaults.host)?,
            port: parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?,
            base_url: lookup("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url),
            static_dir: lookup("STOREFRONT_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            storage_quota_bytes,
            toast_ms,
            session_capacity,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns true when the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim().parse::<T>().map_err(|e| invalid(key, e))
    })
}

/// Parse a sample rate in the inclusive range 0.0-1.0.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(key, format!("{rate} is outside 0.0-1.0")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_quota_bytes, 5 * 1024 * 1024);
        assert_eq!(config.toast_ms, 2500);
        assert_eq!(config.session_capacity, 10_000);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://hcburgers.com.br"),
            ("STOREFRONT_STATIC_DIR", "/srv/static"),
            ("STOREFRONT_STORAGE_QUOTA_BYTES", "1024"),
            ("STOREFRONT_TOAST_MS", "4000"),
            ("STOREFRONT_SESSION_CAPACITY", "500"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_SAMPLE_RATE", "0.5"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.storage_quota_bytes, 1024);
        assert_eq!(config.toast_ms, 4000);
        assert_eq!(config.session_capacity, 500);
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_sample_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_sentry_dsn_is_disabled() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "porta")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(load(&[("STOREFRONT_HOST", "localhost:3000")]).is_err());
    }

    #[test]
    fn test_zero_quota_rejected() {
        assert!(load(&[("STOREFRONT_STORAGE_QUOTA_BYTES", "0")]).is_err());
    }

    #[test]
    fn test_zero_toast_rejected() {
        assert!(load(&[("STOREFRONT_TOAST_MS", "0")]).is_err());
    }

    #[test]
    fn test_zero_session_capacity_rejected() {
        assert!(load(&[("STOREFRONT_SESSION_CAPACITY", "0")]).is_err());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[("SENTRY_TRACES_SAMPLE_RATE", "1.5")]).unwrap_err();
        assert!(err.to_string().contains("SENTRY_TRACES_SAMPLE_RATE"));
    }
}
