//! Resource services.
//!
//! Each service maps one gateway resource to a handful of async operations. All
//! services share a [`Gateway`], which owns the transport, the configuration and the
//! headers every call carries.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::ClientConfig,
    endpoint::ConfigurableEndpointResolver,
    error::{Result, WorldpayError},
    transport::{HttpMethod, HttpTransport, RequestContext, Transport, TransportResponse},
};

pub mod order;
pub mod token;
pub mod transfer;

pub use order::OrderService;
pub use token::TokenService;
pub use transfer::TransferService;

/// Header carrying the client description.
pub const CLIENT_USER_AGENT_HEADER: &str = "X-wp-client-user-agent";

const JSON: &str = "application/json";

/// How a request is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Service key in the `Authorization` header.
    ServiceKey,
    /// Credentials travel in the body (token creation).
    Body,
}

/// Shared state behind every service.
#[derive(Debug, Clone)]
pub(crate) struct Gateway {
    transport: HttpTransport,
    config: Arc<ClientConfig>,
    endpoints: ConfigurableEndpointResolver,
    user_agent: Arc<str>,
}

impl Gateway {
    /// Validates the configuration and builds the transport.
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        let endpoints = ConfigurableEndpointResolver::new(&config.endpoints);

        Ok(Self { transport, config: Arc::new(config), endpoints, user_agent: client_user_agent() })
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoints(&self) -> &ConfigurableEndpointResolver {
        &self.endpoints
    }

    /// Sends a request to `{base_url}{path}` authenticated by the service key.
    pub(crate) async fn send<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<TransportResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_to(&self.config.base_url, method, path, body, Auth::ServiceKey).await
    }

    /// Sends a request to an arbitrary gateway URL.
    pub(crate) async fn send_to<B>(
        &self,
        base_url: &str,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<TransportResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = body.map(serde_json::to_vec).transpose()?;

        let mut headers = vec![("Accept", JSON), (CLIENT_USER_AGENT_HEADER, &*self.user_agent)];
        if auth == Auth::ServiceKey {
            headers.push(("Authorization", self.config.service_key.expose_secret().as_str()));
        }

        let ctx = RequestContext { base_url, path, headers, content_type: Some(JSON) };

        debug!(
            %method,
            path,
            protocol = self.transport.protocol_name(),
            body_bytes = body.as_ref().map_or(0, Vec::len),
            "sending gateway request"
        );

        let body = body.as_deref().unwrap_or_default();
        match method {
            HttpMethod::Get => self.transport.get(ctx).await,
            HttpMethod::Post => self.transport.post(ctx, body).await,
            HttpMethod::Put => self.transport.put(ctx, body).await,
            HttpMethod::Delete => self.transport.delete(ctx).await,
        }
    }
}

/// Describes this client for the gateway's diagnostics.
fn client_user_agent() -> Arc<str> {
    format!(
        "os.name={};os.arch={};lang=rust;lib_version={}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
    .into()
}

/// Rejects identifiers that are blank or would resolve as a dot segment in a path.
pub(crate) fn require_id(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WorldpayError::Validation(format!("{name} must not be empty")));
    }
    if matches!(value, "." | "..") {
        return Err(WorldpayError::Validation(format!("{name} must not be `{value}`")));
    }
    Ok(())
}
