//! Endpoint resolution.
//!
//! Maps each gateway operation to a request path. Identifiers are percent-encoded
//! before substitution, and the services reject `.` and `..` ids, so an order code
//! or token can never change the path shape.

use std::borrow::Cow;

use crate::config::EndpointConfig;

/// Resolves request paths for gateway operations.
pub trait EndpointResolver: Send + Sync {
    /// Order creation path.
    fn create_order_endpoint(&self) -> String;

    /// Single order path, used by find, 3-D Secure authorization and cancel.
    fn order_endpoint(&self, order_code: &str) -> String;

    /// Capture path for an order.
    fn capture_endpoint(&self, order_code: &str) -> String;

    /// Refund path for an order.
    fn refund_endpoint(&self, order_code: &str) -> String;

    /// Single token path.
    fn token_endpoint(&self, token: &str) -> String;

    /// Transfer search path, without query string.
    fn transfers_endpoint(&self) -> String;

    /// Single transfer path.
    fn transfer_endpoint(&self, transfer_id: &str) -> String;
}

/// Endpoint resolver driven by [`EndpointConfig`], falling back to the gateway's
/// standard paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigurableEndpointResolver {
    config: EndpointConfig,
}

impl ConfigurableEndpointResolver {
    /// Creates a resolver from endpoint overrides.
    #[must_use]
    pub fn new(config: &EndpointConfig) -> Self {
        Self { config: config.clone() }
    }

    fn resolve(template: Option<&String>, default: &str, id: &str) -> String {
        let id = encode_segment(id);
        template.map_or(default, String::as_str).replace("{id}", &id)
    }
}

impl EndpointResolver for ConfigurableEndpointResolver {
    fn create_order_endpoint(&self) -> String {
        self.config.orders.as_ref().map_or_else(|| "/orders".to_owned(), Clone::clone)
    }

    fn order_endpoint(&self, order_code: &str) -> String {
        Self::resolve(self.config.order.as_ref(), "/orders/{id}", order_code)
    }

    fn capture_endpoint(&self, order_code: &str) -> String {
        Self::resolve(self.config.capture.as_ref(), "/orders/{id}/capture", order_code)
    }

    fn refund_endpoint(&self, order_code: &str) -> String {
        Self::resolve(self.config.refund.as_ref(), "/orders/{id}/refund", order_code)
    }

    fn token_endpoint(&self, token: &str) -> String {
        Self::resolve(self.config.token.as_ref(), "/tokens/{id}", token)
    }

    fn transfers_endpoint(&self) -> String {
        self.config.transfers.as_ref().map_or_else(|| "/transfers".to_owned(), Clone::clone)
    }

    fn transfer_endpoint(&self, transfer_id: &str) -> String {
        Self::resolve(self.config.transfer.as_ref(), "/transfers/{id}", transfer_id)
    }
}

/// Percent-encodes a single path segment.
pub(crate) fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Appends URL-encoded query parameters to a path.
///
/// # Examples
///
/// ```ignore
/// let path = build_url_with_query("/transfers", &[("merchantId", "m 1"), ("pageNumber", "2")]);
/// assert_eq!(path, "/transfers?merchantId=m%201&pageNumber=2");
/// ```
pub(crate) fn build_url_with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_owned();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}
