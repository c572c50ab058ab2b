//! HTTP transport configuration.
//!
//! Deserialized from the `[http]` table of the client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, WorldpayError};

/// HTTP transport configuration.
///
/// # Examples
///
/// ```toml
/// [http]
/// timeout_secs = 65
/// connect_timeout_secs = 10
/// http_version = "http1"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Maximum idle connections kept per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// HTTP version preference.
    #[serde(default)]
    pub http_version: HttpVersion,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            http_version: HttpVersion::default(),
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if:
    /// - `timeout_secs` is outside 1-300 seconds
    /// - `connect_timeout_secs` is outside 1-60 seconds
    /// - `connect_timeout_secs` exceeds `timeout_secs`
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(WorldpayError::Config(
                "http.timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(WorldpayError::Config(
                "http.connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        if self.connect_timeout_secs > self.timeout_secs {
            return Err(WorldpayError::Config(
                "http.connect_timeout_secs must not exceed http.timeout_secs".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// HTTP version preference.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    /// HTTP/1.1 only.
    Http1,
    /// HTTP/2 only (prior knowledge).
    Http2,
    /// Negotiate via ALPN, falling back to HTTP/1.1.
    #[default]
    Auto,
}

fn default_pool_max_idle() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    65
}

fn default_connect_timeout_secs() -> u64 {
    10
}
