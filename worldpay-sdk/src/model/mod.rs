//! Request and response types for the gateway's JSON API.

pub mod common;
pub mod order;
pub mod token;
pub mod transfer;

pub use common::{Address, CountryCode, CurrencyCode, Entry, Environment};
pub use order::{
    ApmResponse, CaptureOrderRequest, CardResponse, KeyValueResponse, OrderAuthorizationRequest,
    OrderRequest, OrderResponse, OrderStatus, OrderType, PaymentResponse, RefundOrderRequest,
    RiskScore, ThreeDSecureInfo, Transaction,
};
pub use token::{CardRequest, PaymentMethod, TokenRequest, TokenResponse};
pub use transfer::{TransferDetailResponse, TransferSearchResponse, TransferSummary};
