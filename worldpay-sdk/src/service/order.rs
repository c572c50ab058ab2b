//! Order operations.
//!
//! One async method per gateway call. State checks are left to the gateway: calling
//! [`capture`](OrderService::capture) on an order that is not `AUTHORIZED` yields the
//! gateway's state-conflict error as [`WorldpayError::Api`]. Use
//! [`OrderStatus::permits`](crate::model::OrderStatus::permits) to check a snapshot
//! beforehand.

use tracing::{info, instrument};

use super::{Gateway, require_id};
use crate::{
    endpoint::EndpointResolver,
    error::{Result, WorldpayError},
    model::{
        CaptureOrderRequest, OrderAuthorizationRequest, OrderRequest, OrderResponse,
        RefundOrderRequest, Transaction,
    },
    response::{decode, expect_success},
    transport::HttpMethod,
};

/// Client for the `/orders` resource.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OrderService {
    gateway: Gateway,
}

impl OrderService {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Creates an order, consuming a single-use token.
    ///
    /// The returned status is `SUCCESS` for a sale, `AUTHORIZED` for an
    /// authorize-only order (with `amount == 0`) and `PRE_AUTHORIZED` for a
    /// 3-D Secure order awaiting [`authorize_3ds`](Self::authorize_3ds).
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the token is blank or a 3-D Secure order has no
    ///   [`ThreeDSecureInfo`](crate::model::ThreeDSecureInfo); nothing is sent.
    /// - [`WorldpayError::Api`] with custom code `TKN_NOT_FOUND` for an unknown, expired
    ///   or consumed token, or any other gateway rejection.
    /// - [`WorldpayError::Http`] on network failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use worldpay_sdk::{WorldpayClient, model::{CurrencyCode, OrderRequest}};
    ///
    /// # async fn example() -> worldpay_sdk::error::Result<()> {
    /// let client = WorldpayClient::with_service_key("T_S_service-key")?;
    /// let request = OrderRequest::new("TEST_SU_token", 1999, CurrencyCode::GBP, "Order #1")
    ///     .with_name("test name");
    ///
    /// let order = client.orders().create(&request).await?;
    /// println!("{} -> {}", order.order_code, order.payment_status);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(
        skip_all,
        fields(
            amount = request.amount,
            currency = %request.currency_code,
            three_ds = request.is_3ds_order,
            authorize_only = request.authorize_only,
        )
    )]
    pub async fn create(&self, request: &OrderRequest) -> Result<OrderResponse> {
        request.validate()?;

        let path = self.gateway.endpoints().create_order_endpoint();
        let response = self.gateway.send(HttpMethod::Post, &path, Some(request)).await?;
        let order: OrderResponse = decode(&response)?;

        info!(order_code = %order.order_code, status = %order.payment_status, "order created");
        Ok(order)
    }

    /// Completes a 3-D Secure order after the shopper's issuer challenge.
    ///
    /// Valid only for `PRE_AUTHORIZED` orders; moves the order to `SUCCESS`.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code or response code is blank.
    /// - [`WorldpayError::Api`] if the order is in another state or the response code is
    ///   rejected.
    #[instrument(skip(self, request))]
    pub async fn authorize_3ds(
        &self,
        order_code: &str,
        request: &OrderAuthorizationRequest,
    ) -> Result<OrderResponse> {
        require_id("order code", order_code)?;
        require_id("3-D Secure response code", &request.three_ds_response_code)?;

        let path = self.gateway.endpoints().order_endpoint(order_code);
        let response = self.gateway.send(HttpMethod::Put, &path, Some(request)).await?;
        let order: OrderResponse = decode(&response)?;

        info!(status = %order.payment_status, "3-D Secure order authorized");
        Ok(order)
    }

    /// Fetches the current snapshot of an order.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code is blank.
    /// - [`WorldpayError::Api`] if the order does not exist.
    #[instrument(skip(self))]
    pub async fn find_order(&self, order_code: &str) -> Result<Transaction> {
        require_id("order code", order_code)?;

        let path = self.gateway.endpoints().order_endpoint(order_code);
        let response = self.gateway.send::<()>(HttpMethod::Get, &path, None).await?;
        decode(&response)
    }

    /// Captures an authorized order, fully or partially.
    ///
    /// Valid only for `AUTHORIZED` orders. On success the order is `SUCCESS`, `amount` is
    /// the captured amount and `authorizedAmount` is unchanged.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code is blank or the amount is zero.
    /// - [`WorldpayError::Api`] with message `"Capture amount cannot be more than
    ///   authorized order amount"` when capturing more than was authorized; the order
    ///   is left unchanged.
    #[instrument(skip(self, request), fields(capture_amount = ?request.capture_amount))]
    pub async fn capture(
        &self,
        request: &CaptureOrderRequest,
        order_code: &str,
    ) -> Result<OrderResponse> {
        require_id("order code", order_code)?;
        if request.capture_amount == Some(0) {
            return Err(WorldpayError::Validation(
                "capture amount must be greater than zero".to_owned(),
            ));
        }

        let path = self.gateway.endpoints().capture_endpoint(order_code);
        let response = self.gateway.send(HttpMethod::Post, &path, Some(request)).await?;
        let order: OrderResponse = decode(&response)?;

        info!(amount = order.amount, "order captured");
        Ok(order)
    }

    /// Cancels an authorized order, releasing the authorization.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code is blank.
    /// - [`WorldpayError::Api`] if the order is not `AUTHORIZED`.
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_code: &str) -> Result<()> {
        require_id("order code", order_code)?;

        let path = self.gateway.endpoints().order_endpoint(order_code);
        let response = self.gateway.send::<()>(HttpMethod::Delete, &path, None).await?;
        expect_success(&response)?;

        info!("order cancelled");
        Ok(())
    }

    /// Refunds the full captured amount of a paid order.
    ///
    /// The resulting status is up to the gateway; re-read the order with
    /// [`find_order`](Self::find_order) if it matters.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code is blank.
    /// - [`WorldpayError::Api`] if the order is not `SUCCESS`.
    #[instrument(skip(self))]
    pub async fn refund(&self, order_code: &str) -> Result<()> {
        self.send_refund(order_code, None).await
    }

    /// Refunds part of the captured amount of a paid order.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the order code is blank or the amount is zero.
    /// - [`WorldpayError::Api`] if the order is not `SUCCESS` or the amount exceeds what
    ///   is left to refund.
    #[instrument(skip(self))]
    pub async fn partial_refund(&self, order_code: &str, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(WorldpayError::Validation(
                "refund amount must be greater than zero".to_owned(),
            ));
        }
        self.send_refund(order_code, Some(RefundOrderRequest { refund_amount: amount })).await
    }

    async fn send_refund(&self, order_code: &str, body: Option<RefundOrderRequest>) -> Result<()> {
        require_id("order code", order_code)?;

        let path = self.gateway.endpoints().refund_endpoint(order_code);
        let response = self.gateway.send(HttpMethod::Post, &path, body.as_ref()).await?;
        expect_success(&response)?;

        info!(refund_amount = ?body.map(|b| b.refund_amount), "order refunded");
        Ok(())
    }
}
