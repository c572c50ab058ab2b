//! Client configuration.
//!
//! A [`ClientConfig`] can be built in code, parsed from TOML, or read from
//! `WORLDPAY_*` environment variables.
//!
//! ```toml
//! service_key = "T_S_00000000-0000-0000-0000-000000000000"
//! client_key = "T_C_00000000-0000-0000-0000-000000000000"
//! merchant_id = "00000000-0000-0000-0000-000000000000"
//! base_url = "https://api.worldpay.com/v1"
//!
//! [http]
//! timeout_secs = 30
//!
//! [endpoints]
//! order = "/orders/{id}"
//! ```

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{Result, WorldpayError},
    transport::{HttpConfig, http::is_loopback_host},
};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.worldpay.com/v1";

/// Environment variable holding the service key.
pub const ENV_SERVICE_KEY: &str = "WORLDPAY_SERVICE_KEY";
/// Environment variable holding the client key.
pub const ENV_CLIENT_KEY: &str = "WORLDPAY_CLIENT_KEY";
/// Environment variable holding the merchant id.
pub const ENV_MERCHANT_ID: &str = "WORLDPAY_MERCHANT_ID";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "WORLDPAY_BASE_URL";
/// Environment variable overriding the token URL.
pub const ENV_TOKEN_URL: &str = "WORLDPAY_TOKEN_URL";

/// Settings for a [`WorldpayClient`](crate::WorldpayClient).
///
/// Keys are held as [`SecretString`] and print as `[REDACTED]` in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Service key, sent as `Authorization` on every gateway call.
    pub service_key: SecretString,

    /// Client key, used to create tokens.
    #[serde(default)]
    pub client_key: Option<SecretString>,

    /// Merchant id, used as the default for transfer searches.
    #[serde(default)]
    pub merchant_id: Option<String>,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token endpoint URL (default: `{base_url}/tokens`).
    #[serde(default)]
    pub token_url: Option<String>,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Endpoint path overrides.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl ClientConfig {
    /// Creates a configuration for the production endpoint.
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: SecretString::new(service_key.into()),
            client_key: None,
            merchant_id: None,
            base_url: default_base_url(),
            token_url: None,
            http: HttpConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }

    /// Sets the client key.
    #[must_use]
    pub fn with_client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = Some(SecretString::new(client_key.into()));
        self
    }

    /// Sets the merchant id.
    #[must_use]
    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the token URL.
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Sets the HTTP transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if the TOML is malformed or fails
    /// [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay_sdk::config::ClientConfig;
    ///
    /// let config = ClientConfig::from_toml(r#"
    ///     service_key = "T_S_key"
    ///     base_url = "https://api.worldpay.com/v1"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.token_url(), "https://api.worldpay.com/v1/tokens");
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| WorldpayError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WorldpayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Builds a configuration from `WORLDPAY_*` environment variables.
    ///
    /// `WORLDPAY_SERVICE_KEY` is required; `WORLDPAY_CLIENT_KEY`, `WORLDPAY_MERCHANT_ID`,
    /// `WORLDPAY_BASE_URL` and `WORLDPAY_TOKEN_URL` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if the service key is missing or the result
    /// fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Same rules as [`from_env`](Self::from_env). Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if the service key is missing or the result
    /// fails [`validate`](Self::validate).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let service_key = var(ENV_SERVICE_KEY)
            .ok_or_else(|| WorldpayError::Config(format!("{ENV_SERVICE_KEY} is not set")))?;

        let mut config = Self::new(service_key);
        config.client_key = var(ENV_CLIENT_KEY).map(SecretString::new);
        config.merchant_id = var(ENV_MERCHANT_ID);
        if let Some(base_url) = var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        config.token_url = var(ENV_TOKEN_URL);

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - the service key is not blank
    /// - `base_url` and `token_url` are HTTPS (plain HTTP only for loopback hosts)
    /// - HTTP timeouts are within bounds
    /// - endpoint templates start with `/` and contain no `..` or `//`
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.service_key.expose_secret().trim().is_empty() {
            return Err(WorldpayError::Config("service key must not be empty".to_owned()));
        }
        if self.service_key.expose_secret().contains(['\r', '\n', '\0']) {
            return Err(WorldpayError::Config(
                "service key contains control characters".to_owned(),
            ));
        }

        validate_gateway_url("base_url", &self.base_url)?;
        if let Some(ref token_url) = self.token_url {
            validate_gateway_url("token_url", token_url)?;
        }

        self.http.validate()?;
        self.endpoints.validate()?;

        Ok(())
    }

    /// Returns the URL token requests are posted to.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.token_url
            .clone()
            .unwrap_or_else(|| format!("{}/tokens", self.base_url.trim_end_matches('/')))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn validate_gateway_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| WorldpayError::Config(format!("invalid {name} '{value}': {e}")))?;

    match url.scheme() {
        "https" => Ok(()),
        "http" if url.host_str().is_some_and(is_loopback_host) => Ok(()),
        scheme => Err(WorldpayError::Config(format!(
            "{name} must use HTTPS (plain HTTP only for loopback hosts), got: {scheme}"
        ))),
    }
}

/// Endpoint path overrides.
///
/// Templates use `{id}` as the placeholder for the order code, token or transfer id.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Order creation endpoint (default: "/orders").
    pub orders: Option<String>,

    /// Single order endpoint template (default: "/orders/{id}").
    /// Used by find, 3-D Secure authorization and cancel.
    pub order: Option<String>,

    /// Capture endpoint template (default: "/orders/{id}/capture").
    pub capture: Option<String>,

    /// Refund endpoint template (default: "/orders/{id}/refund").
    pub refund: Option<String>,

    /// Single token endpoint template (default: "/tokens/{id}").
    pub token: Option<String>,

    /// Transfer search endpoint (default: "/transfers").
    pub transfers: Option<String>,

    /// Single transfer endpoint template (default: "/transfers/{id}").
    pub transfer: Option<String>,
}

impl EndpointConfig {
    /// Validates endpoint templates.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`] if any template is unsafe.
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("orders", &self.orders),
            ("order", &self.order),
            ("capture", &self.capture),
            ("refund", &self.refund),
            ("token", &self.token),
            ("transfers", &self.transfers),
            ("transfer", &self.transfer),
        ];

        for (name, endpoint) in endpoints {
            if let Some(path) = endpoint {
                validate_endpoint_path(name, path)?;
            }
        }

        Ok(())
    }
}

/// Validates an endpoint path template.
pub(crate) fn validate_endpoint_path(name: &str, path: &str) -> Result<()> {
    if path.contains("..") {
        return Err(WorldpayError::Config(format!(
            "endpoint '{name}' contains path traversal sequence '..': {path}"
        )));
    }

    if path.contains("//") {
        return Err(WorldpayError::Config(format!(
            "endpoint '{name}' contains double slash '//': {path}"
        )));
    }

    if path.contains('?') {
        return Err(WorldpayError::Config(format!(
            "endpoint '{name}' must not contain a query string: {path}"
        )));
    }

    if !path.starts_with('/') {
        return Err(WorldpayError::Config(format!("endpoint '{name}' must start with '/': {path}")));
    }

    Ok(())
}
