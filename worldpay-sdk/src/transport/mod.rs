//! Transport abstraction layer.
//!
//! A sealed [`Transport`] trait issues exactly one HTTP exchange and hands back the
//! raw status and body. It knows nothing about orders, tokens or error envelopes:
//! mapping a response to a DTO or an [`ApiError`](crate::error::ApiError) happens in
//! the resource services.
//!
//! # Examples
//!
//! ```rust,no_run
//! use worldpay_sdk::transport::{HttpTransport, RequestContext, Transport};
//!
//! # async fn example() -> worldpay_sdk::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let ctx = RequestContext {
//!     base_url: "https://api.worldpay.com/v1",
//!     path: "/orders/8b8f6e0a",
//!     headers: vec![("Authorization", "T_S_service-key")],
//!     content_type: None,
//! };
//!
//! let response = transport.get(ctx).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::fmt;

use crate::error::Result;

pub mod config;
pub mod http;
mod sealed;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// HTTP methods used by the gateway API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request context for transport operations.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Base URL (e.g., <https://api.worldpay.com/v1>).
    pub base_url: &'a str,
    /// Request path including any query string (e.g., "/orders/abc/capture").
    pub path: &'a str,
    /// Additional HTTP headers to include.
    pub headers: Vec<(&'a str, &'a str)>,
    /// Content-Type header value (if applicable).
    pub content_type: Option<&'a str>,
}

/// Response from transport operations.
///
/// Returned for every status code; only network failures are errors at this layer.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true when the body is empty or whitespace only.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Transport protocol abstraction.
///
/// This trait is sealed; only implementations within this crate are allowed.
///
/// Implementations must:
/// - Reject URLs that are not `https` (plain `http` is accepted for loopback hosts only)
/// - Reject paths with traversal sequences and headers with control characters
/// - Return non-2xx responses as [`TransportResponse`], not as errors
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built or the HTTP exchange fails.
    fn get<'a>(
        &'a self,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a POST request with body.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built or the HTTP exchange fails.
    fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a PUT request with body.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built or the HTTP exchange fails.
    fn put<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built or the HTTP exchange fails.
    fn delete<'a>(
        &'a self,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
