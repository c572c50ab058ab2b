//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 transport using reqwest with rustls.

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{Result, WorldpayError},
    transport::{HttpMethod, RequestContext, Transport, TransportResponse, sealed},
};

/// Returns true for `localhost` and loopback IP literals.
pub(crate) fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']').to_ascii_lowercase();
    host == "localhost"
        || host.parse::<std::net::IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

/// Validates URL scheme.
///
/// HTTPS is required; plain HTTP is only accepted for loopback hosts such as a local
/// gateway double.
fn validate_url(url: &Url) -> Result<()> {
    match url.scheme() {
        "https" => Ok(()),
        "http" if url.host_str().is_some_and(is_loopback_host) => Ok(()),
        "http" => Err(WorldpayError::Transport(
            "plain HTTP is only allowed for loopback hosts".to_owned(),
        )),
        scheme => Err(WorldpayError::Transport(format!("unsupported URL scheme: {scheme}"))),
    }
}

/// Returns true for `.` and `..`, including their percent-encoded spellings.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    matches!(decoded.as_str(), "." | "..")
}

/// Rejects paths containing dot segments or empty segments.
///
/// Only the part before the query string is checked.
fn sanitize_path(path: &str) -> Result<&str> {
    let path_only = path.split_once('?').map_or(path, |(p, _)| p);
    if path_only.contains("//") || path_only.split('/').any(is_dot_segment) {
        return Err(WorldpayError::Transport(
            "Invalid path: traversal sequences not allowed".to_owned(),
        ));
    }
    if !path.is_empty() && !path.starts_with('/') {
        return Err(WorldpayError::Transport("Path must start with '/'".to_owned()));
    }
    Ok(path)
}

/// Validates header name and value for CRLF injection prevention.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains(['\r', '\n', '\0']) {
        return Err(WorldpayError::Transport(
            "Invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(WorldpayError::Transport(
            "Invalid header value: control characters not allowed".to_owned(),
        ));
    }
    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Connection pooling and keep-alive come from the underlying [`reqwest::Client`];
/// cloning the transport shares the pool.
///
/// # Examples
///
/// ```
/// use worldpay_sdk::transport::{HttpConfig, HttpTransport, HttpVersion, Transport};
///
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a new HTTP transport with [`HttpConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created (e.g. TLS backend failure).
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(WorldpayError::Http)?;

        Ok(Self { client, http_version: config.http_version })
    }

    #[instrument(
        skip_all,
        fields(method = %method, path = ctx.path, status = tracing::field::Empty)
    )]
    async fn execute_request(
        &self,
        ctx: RequestContext<'_>,
        method: HttpMethod,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse> {
        let url = Url::parse(ctx.base_url)
            .map_err(|e| WorldpayError::Transport(format!("invalid base URL: {e}")))?;

        validate_url(&url)?;
        let path = sanitize_path(ctx.path)?;
        for (key, value) in &ctx.headers {
            validate_header(key, value)?;
        }

        let full_url = format!("{}{path}", ctx.base_url.trim_end_matches('/'));

        let mut request = match method {
            HttpMethod::Get => self.client.get(&full_url),
            HttpMethod::Post => self.client.post(&full_url),
            HttpMethod::Put => self.client.put(&full_url),
            HttpMethod::Delete => self.client.delete(&full_url),
        };

        if let Some(content_type) = ctx.content_type {
            request = request.header("Content-Type", content_type);
        }

        for (key, value) in ctx.headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);

        let response_body = response.bytes().await.map_err(WorldpayError::Http)?.to_vec();
        debug!(status, bytes = response_body.len(), "gateway responded");

        Ok(TransportResponse { status, body: response_body })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(&'a self, ctx: RequestContext<'a>) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Get, None).await
    }

    async fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Post, Some(body)).await
    }

    async fn put<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Put, Some(body)).await
    }

    async fn delete<'a>(&'a self, ctx: RequestContext<'a>) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Delete, None).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}
