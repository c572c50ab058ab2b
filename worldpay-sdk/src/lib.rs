//! Worldpay SDK: async client for the Worldpay online payments REST API
//!
//! Create orders from single-use card tokens, complete 3-D Secure challenges,
//! capture, refund and cancel orders, manage tokens and look up transfers.
//!
//! # What the SDK owns
//!
//! The gateway owns every order. This crate owns:
//!
//! - **Typed DTOs** ([`model`]) matching the gateway's JSON bit-exactly
//! - **Resource services** ([`OrderService`], [`TokenService`], [`TransferService`]),
//!   one async method per gateway call
//! - **The order lifecycle** ([`lifecycle`]): which operation is valid in which status
//! - **Error envelope mapping** ([`error`]): every non-2xx response becomes one
//!   [`WorldpayError::Api`] carrying the gateway's [`ApiError`](error::ApiError)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 WorldpayClient                   │
//! │  ┌──────────────┐ ┌─────────────┐ ┌────────────┐ │
//! │  │ OrderService │ │TokenService │ │ Transfer   │ │
//! │  │              │ │             │ │ Service    │ │
//! │  └──────┬───────┘ └──────┬──────┘ └─────┬──────┘ │
//! │         └────────────────┼──────────────┘        │
//! │                   ┌──────▼──────┐                │
//! │                   │   Gateway   │ headers, keys  │
//! │                   └──────┬──────┘                │
//! │                   ┌──────▼──────┐                │
//! │                   │  Transport  │ reqwest+rustls │
//! │                   └──────┬──────┘                │
//! └──────────────────────────┼───────────────────────┘
//!                            │ HTTPS + JSON
//!                    ┌───────▼────────┐
//!                    │ Worldpay API   │
//!                    └────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use worldpay_sdk::{
//!     WorldpayClient,
//!     config::ClientConfig,
//!     model::{CaptureOrderRequest, CardRequest, CurrencyCode, OrderRequest, OrderStatus},
//! };
//!
//! # async fn example() -> worldpay_sdk::error::Result<()> {
//! let config = ClientConfig::new("T_S_service-key").with_client_key("T_C_client-key");
//! let client = WorldpayClient::new(config)?;
//!
//! // Tokenize the card
//! let card = CardRequest::new("javalib client", "5555 5555 5555 4444", "123", 2, 2018);
//! let token = client.tokens().tokenize(card, false).await?;
//!
//! // Authorize 19.99 GBP without capturing
//! let request = OrderRequest::new(token.token, 1999, CurrencyCode::GBP, "test description")
//!     .authorize_only();
//! let order = client.orders().create(&request).await?;
//! assert_eq!(order.payment_status, OrderStatus::Authorized);
//!
//! // Capture 9.00 GBP of it
//! let captured =
//!     client.orders().capture(&CaptureOrderRequest::partial(900), &order.order_code).await?;
//! assert_eq!(captured.amount, 900);
//! # Ok(())
//! # }
//! ```
//!
//! # Handling gateway errors
//!
//! ```rust,no_run
//! use worldpay_sdk::{
//!     WorldpayClient,
//!     error::{ApiErrorKind, TOKEN_NOT_FOUND},
//!     model::{CurrencyCode, OrderRequest},
//! };
//!
//! # async fn example(client: WorldpayClient) {
//! let request = OrderRequest::new("invalid-token", 1999, CurrencyCode::GBP, "d");
//!
//! match client.orders().create(&request).await {
//!     Ok(order) => println!("created {}", order.order_code),
//!     Err(e) if e.custom_code() == Some(TOKEN_NOT_FOUND) => println!("token expired"),
//!     Err(e) if e.kind() == Some(ApiErrorKind::InvalidState) => println!("wrong state: {e}"),
//!     Err(e) => eprintln!("failed: {e}"),
//! }
//! # }
//! ```
//!
//! # Logging
//!
//! Every operation runs in a [`tracing`] span. Keys, card numbers and CVCs are
//! never recorded. Install any subscriber to see them.
//!
//! # Security
//!
//! - HTTPS only; plain HTTP is accepted for loopback hosts (local test doubles)
//! - Service and client keys are held as [`secrecy::SecretString`]
//! - Identifiers are percent-encoded into paths; traversal sequences and header
//!   injection are rejected

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and wiremock"
)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod response;
pub mod service;
pub mod transport;

pub use client::WorldpayClient;
pub use config::ClientConfig;
pub use error::{Result, WorldpayError};
pub use service::{OrderService, TokenService, TransferService};
