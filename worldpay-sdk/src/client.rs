//! Client facade.

use crate::{
    config::ClientConfig,
    error::Result,
    service::{Gateway, OrderService, TokenService, TransferService},
};

/// Entry point to the gateway.
///
/// Built once from a [`ClientConfig`]; the services it hands out share one
/// connection pool and can be cloned freely.
///
/// # Examples
///
/// ```no_run
/// use worldpay_sdk::{WorldpayClient, config::ClientConfig};
///
/// # async fn example() -> worldpay_sdk::error::Result<()> {
/// let config = ClientConfig::new("T_S_service-key").with_client_key("T_C_client-key");
/// let client = WorldpayClient::new(config)?;
///
/// let transaction = client.orders().find_order("8b8f6e0a").await?;
/// println!("{}", transaction.order_response.payment_status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorldpayClient {
    gateway: Gateway,
}

impl WorldpayClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Config`](crate::error::WorldpayError::Config) if the
    /// configuration is invalid, or
    /// [`WorldpayError::Http`](crate::error::WorldpayError::Http) if the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self { gateway: Gateway::new(config)? })
    }

    /// Creates a client for the production endpoint with only a service key.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_service_key(service_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(service_key))
    }

    /// Creates a client from `WORLDPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Order operations.
    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.gateway.clone())
    }

    /// Token operations.
    #[must_use]
    pub fn tokens(&self) -> TokenService {
        TokenService::new(self.gateway.clone())
    }

    /// Transfer lookups.
    #[must_use]
    pub fn transfers(&self) -> TransferService {
        TransferService::new(self.gateway.clone())
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.gateway.config()
    }
}
