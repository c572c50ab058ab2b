//! Error types for the Worldpay SDK.
//!
//! Every fallible operation in this crate returns [`Result<T>`], which uses
//! [`WorldpayError`] as its error type. All errors implement the standard
//! [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Network Errors** ([`WorldpayError::Http`]): the request never produced a response
//! - **Gateway Errors** ([`WorldpayError::Api`]): the gateway answered with a non-2xx status
//!   and an [`ApiError`] envelope
//! - **Validation Errors** ([`WorldpayError::Validation`]): local input rejected before
//!   anything was sent
//! - **Configuration Errors** ([`WorldpayError::Config`]): the client cannot be built
//!
//! # Examples
//!
//! ```
//! use worldpay_sdk::error::{ApiError, ApiErrorKind, WorldpayError};
//!
//! let error = WorldpayError::Api(ApiError {
//!     http_status_code: Some(400),
//!     custom_code: "TKN_NOT_FOUND".to_owned(),
//!     message: "Token not found".to_owned(),
//!     ..ApiError::default()
//! });
//!
//! assert_eq!(error.to_string(), "API error: Token not found");
//! assert_eq!(error.custom_code(), Some("TKN_NOT_FOUND"));
//! assert_eq!(error.kind(), Some(ApiErrorKind::InvalidToken));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custom code returned when an order references an unknown, expired or consumed token.
pub const TOKEN_NOT_FOUND: &str = "TKN_NOT_FOUND";

/// Custom code used for envelopes the SDK had to synthesize from an unparseable body.
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Message the gateway returns when a capture exceeds the authorized amount.
pub const CAPTURE_AMOUNT_EXCEEDED: &str =
    "Capture amount cannot be more than authorized order amount";

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, WorldpayError>;

/// Errors that can occur while talking to the gateway.
///
/// # Error Recovery
///
/// - **[`Http`](Self::Http)**: transient in most cases. The SDK never retries; the caller
///   decides whether the operation is safe to repeat.
/// - **[`Api`](Self::Api)**: branch on [`custom_code`](Self::custom_code) or
///   [`kind`](Self::kind). The message is for diagnostics only.
/// - **[`Validation`](Self::Validation)**: fix the request. Nothing reached the gateway.
/// - **[`Config`](Self::Config)**: fix the client configuration.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum WorldpayError {
    /// HTTP exchange failed before a response was received.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS failure or a
    /// connect/read timeout from [`HttpConfig`](crate::transport::HttpConfig).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway rejected the request.
    ///
    /// The display form is `API error: <message>` with the gateway's message verbatim,
    /// so `"API error: Capture amount cannot be more than authorized order amount"` is a
    /// stable string to match on.
    #[error("API error: {}", .0.message)]
    Api(ApiError),

    /// Request rejected locally before transmission.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay_sdk::error::WorldpayError;
    ///
    /// let err = WorldpayError::Validation("order code must not be empty".to_owned());
    /// assert_eq!(err.to_string(), "Invalid request: order code must not be empty");
    /// ```
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Request body could not be encoded, or a 2xx body could not be decoded.
    #[error("JSON (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration is invalid.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// Transport refused to build the request (bad URL, path or header).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl WorldpayError {
    /// Returns the gateway error envelope, if this is an [`Api`](Self::Api) error.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api_error) => Some(api_error),
            _ => None,
        }
    }

    /// Returns the gateway's machine-readable custom code, if any.
    #[must_use]
    pub fn custom_code(&self) -> Option<&str> {
        self.api_error().map(|e| e.custom_code.as_str())
    }

    /// Returns the classified kind of a gateway error, if any.
    #[must_use]
    pub fn kind(&self) -> Option<ApiErrorKind> {
        self.api_error().map(ApiError::kind)
    }
}

/// Error envelope returned by the gateway with every non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status as reported in the body (filled from the response status when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
    /// Stable machine-readable code, e.g. `TKN_NOT_FOUND`.
    #[serde(default)]
    pub custom_code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Longer description of the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to the gateway's documentation for this error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_help_url: Option<String>,
    /// Request that caused the error, as echoed by the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<String>,
}

/// Coarse classification of gateway errors.
///
/// Derived from the custom code, message and HTTP status of an [`ApiError`].
/// Anything not recognized is [`Other`](Self::Other); callers that need finer
/// control should match on [`ApiError::custom_code`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Token is invalid, expired or already consumed.
    InvalidToken,
    /// 3-D Secure order submitted without valid shopper session data.
    InvalidThreeDSecureInfo,
    /// Operation not valid in the order's current status.
    InvalidState,
    /// Capture amount larger than the authorized amount.
    CaptureAmountExceeded,
    /// Order, token or transfer does not exist.
    NotFound,
    /// Service or client key rejected.
    Unauthorized,
    /// Anything else.
    Other,
}

impl ApiError {
    /// Synthesizes an envelope for a non-2xx response whose body was not a valid envelope.
    pub(crate) fn unparsed(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let message = if text.trim().is_empty() {
            format!("gateway returned status {status} with no error body")
        } else {
            text.into_owned()
        };

        Self {
            http_status_code: Some(status),
            custom_code: UNKNOWN_ERROR.to_owned(),
            message,
            ..Self::default()
        }
    }

    /// Classifies this envelope.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay_sdk::error::{ApiError, ApiErrorKind};
    ///
    /// let error = ApiError {
    ///     http_status_code: Some(400),
    ///     custom_code: "BAD_REQUEST".to_owned(),
    ///     message: "Capture amount cannot be more than authorized order amount".to_owned(),
    ///     ..ApiError::default()
    /// };
    /// assert_eq!(error.kind(), ApiErrorKind::CaptureAmountExceeded);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        let code = self.custom_code.to_ascii_uppercase();
        let message = self.message.to_ascii_lowercase();

        if code.starts_with("TKN_") {
            return ApiErrorKind::InvalidToken;
        }
        if code.contains("STATE") {
            return ApiErrorKind::InvalidState;
        }
        if code.contains("3DS") {
            return ApiErrorKind::InvalidThreeDSecureInfo;
        }
        if self.message.contains(CAPTURE_AMOUNT_EXCEEDED) {
            return ApiErrorKind::CaptureAmountExceeded;
        }

        // Message heuristics only apply to plain validation failures.
        match self.http_status_code {
            Some(409) => ApiErrorKind::InvalidState,
            Some(400) if message.contains("threedsecure") || message.contains("3ds") => {
                ApiErrorKind::InvalidThreeDSecureInfo
            }
            Some(404) => ApiErrorKind::NotFound,
            Some(401 | 403) => ApiErrorKind::Unauthorized,
            _ if code.ends_with("_NOT_FOUND") => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.custom_code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, code: &str, message: &str) -> ApiError {
        ApiError {
            http_status_code: Some(status),
            custom_code: code.to_owned(),
            message: message.to_owned(),
            ..ApiError::default()
        }
    }

    #[test]
    fn test_api_error_display_echoes_message() {
        let error = WorldpayError::Api(api_error(400, "BAD_REQUEST", CAPTURE_AMOUNT_EXCEEDED));
        assert_eq!(
            error.to_string(),
            "API error: Capture amount cannot be more than authorized order amount"
        );
    }

    #[test]
    fn test_custom_code_accessor() {
        let error = WorldpayError::Api(api_error(400, TOKEN_NOT_FOUND, "Token not found"));
        assert_eq!(error.custom_code(), Some("TKN_NOT_FOUND"));

        let error = WorldpayError::Validation("missing".to_owned());
        assert_eq!(error.custom_code(), None);
        assert!(error.api_error().is_none());
        assert!(error.kind().is_none());
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(api_error(400, "TKN_NOT_FOUND", "x").kind(), ApiErrorKind::InvalidToken);
        assert_eq!(api_error(400, "TKN_EXPIRED", "x").kind(), ApiErrorKind::InvalidToken);
        assert_eq!(
            api_error(400, "BAD_REQUEST", CAPTURE_AMOUNT_EXCEEDED).kind(),
            ApiErrorKind::CaptureAmountExceeded
        );
        assert_eq!(
            api_error(400, "BAD_REQUEST", "threeDSecureInfo is required").kind(),
            ApiErrorKind::InvalidThreeDSecureInfo
        );
        assert_eq!(
            api_error(400, "ORDER_INVALID_STATE", "Order is not authorized").kind(),
            ApiErrorKind::InvalidState
        );
        assert_eq!(api_error(409, "CONFLICT", "nope").kind(), ApiErrorKind::InvalidState);
        assert_eq!(
            api_error(
                409,
                "ORDR_INVALID_STATE",
                "Order must be PRE_AUTHORIZED to complete 3DS authorization"
            )
            .kind(),
            ApiErrorKind::InvalidState
        );
        assert_eq!(
            api_error(500, "INTERNAL", "3DS directory unavailable").kind(),
            ApiErrorKind::Other
        );
        assert_eq!(
            api_error(400, "INVALID_3DS_RESPONSE", "x").kind(),
            ApiErrorKind::InvalidThreeDSecureInfo
        );
        assert_eq!(api_error(404, "ORDR_NOT_FOUND", "x").kind(), ApiErrorKind::NotFound);
        assert_eq!(api_error(400, "ORDR_NOT_FOUND", "x").kind(), ApiErrorKind::NotFound);
        assert_eq!(api_error(401, "UNAUTHORIZED", "x").kind(), ApiErrorKind::Unauthorized);
        assert_eq!(api_error(500, "INTERNAL", "boom").kind(), ApiErrorKind::Other);
    }

    #[test]
    fn test_unparsed_envelope_keeps_body() {
        let error = ApiError::unparsed(502, b"<html>Bad Gateway</html>");
        assert_eq!(error.http_status_code, Some(502));
        assert_eq!(error.custom_code, UNKNOWN_ERROR);
        assert_eq!(error.message, "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_unparsed_envelope_empty_body() {
        let error = ApiError::unparsed(503, b"  ");
        assert_eq!(error.message, "gateway returned status 503 with no error body");
    }

    #[test]
    fn test_api_error_wire_format() {
        let json = r#"{
            "httpStatusCode": 400,
            "customCode": "TKN_NOT_FOUND",
            "message": "Token not found",
            "description": "Token invalid-token does not exist",
            "errorHelpUrl": "https://developer.worldpay.com",
            "originalRequest": "{}"
        }"#;

        let error: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(error.http_status_code, Some(400));
        assert_eq!(error.custom_code, "TKN_NOT_FOUND");
        assert_eq!(error.description.as_deref(), Some("Token invalid-token does not exist"));
        assert_eq!(error.to_string(), "TKN_NOT_FOUND: Token not found");
    }

    #[test]
    fn test_config_error_display() {
        let error = WorldpayError::Config("service key must not be empty".to_owned());
        assert_eq!(
            error.to_string(),
            "Invalid client configuration: service key must not be empty"
        );
    }
}
