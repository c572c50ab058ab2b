//! Order DTOs.
//!
//! Field names follow the gateway's camelCase JSON schema. Optional request fields
//! are omitted from the body when unset.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{Address, CurrencyCode, Entry, Environment, entries_as_map};
use crate::error::{Result, WorldpayError};

/// Request body for `POST /orders`.
///
/// # Examples
///
/// ```
/// use worldpay_sdk::model::{CurrencyCode, OrderRequest};
///
/// let request = OrderRequest::new("TEST_SU_8a8d2e0c", 1999, CurrencyCode::GBP, "test description")
///     .with_name("test name")
///     .authorize_only();
///
/// assert!(request.authorize_only);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Token issued by the token endpoint.
    pub token: String,
    /// Free-text description shown to the merchant.
    pub order_description: String,
    /// Amount in minor units.
    pub amount: u64,
    /// Order currency.
    pub currency_code: CurrencyCode,
    /// Cardholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// Delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
    /// Merchant-defined identifiers, echoed back on the order.
    #[serde(default, with = "entries_as_map", skip_serializing_if = "Vec::is_empty")]
    pub customer_identifiers: Vec<Entry>,
    /// Merchant's own order reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_order_code: Option<String>,
    /// Channel the order came through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    /// Whether the order goes through 3-D Secure.
    #[serde(rename = "is3DSOrder", default)]
    pub is_3ds_order: bool,
    /// Shopper session data, required for 3-D Secure orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_d_secure_info: Option<ThreeDSecureInfo>,
    /// Authorize without capturing.
    #[serde(default)]
    pub authorize_only: bool,
    /// Shopper's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopper_email_address: Option<String>,
    /// Currency the merchant is settled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_currency: Option<CurrencyCode>,
    /// Text on the shopper's statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_narrative: Option<String>,
}

impl OrderRequest {
    /// Creates a sale request with the mandatory fields set.
    pub fn new(
        token: impl Into<String>,
        amount: u64,
        currency_code: CurrencyCode,
        order_description: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            order_description: order_description.into(),
            amount,
            currency_code,
            name: None,
            billing_address: None,
            delivery_address: None,
            customer_identifiers: Vec::new(),
            customer_order_code: None,
            order_type: None,
            is_3ds_order: false,
            three_d_secure_info: None,
            authorize_only: false,
            shopper_email_address: None,
            settlement_currency: None,
            statement_narrative: None,
        }
    }

    /// Sets the cardholder name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the billing address.
    #[must_use]
    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    /// Sets the delivery address.
    #[must_use]
    pub fn with_delivery_address(mut self, address: Address) -> Self {
        self.delivery_address = Some(address);
        self
    }

    /// Appends a customer identifier.
    #[must_use]
    pub fn with_customer_identifier(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.customer_identifiers.push(Entry::new(key, value));
        self
    }

    /// Sets the merchant's order reference.
    #[must_use]
    pub fn with_customer_order_code(mut self, code: impl Into<String>) -> Self {
        self.customer_order_code = Some(code.into());
        self
    }

    /// Sets the order type.
    #[must_use]
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Marks the order as 3-D Secure and attaches the shopper session data.
    #[must_use]
    pub fn with_three_d_secure(mut self, info: ThreeDSecureInfo) -> Self {
        self.is_3ds_order = true;
        self.three_d_secure_info = Some(info);
        self
    }

    /// Authorizes the amount without capturing it.
    #[must_use]
    pub fn authorize_only(mut self) -> Self {
        self.authorize_only = true;
        self
    }

    /// Sets the shopper's email address.
    #[must_use]
    pub fn with_shopper_email(mut self, email: impl Into<String>) -> Self {
        self.shopper_email_address = Some(email.into());
        self
    }

    /// Sets the settlement currency.
    #[must_use]
    pub fn with_settlement_currency(mut self, currency: CurrencyCode) -> Self {
        self.settlement_currency = Some(currency);
        self
    }

    /// Sets the statement narrative.
    #[must_use]
    pub fn with_statement_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.statement_narrative = Some(narrative.into());
        self
    }

    /// Checks the request for mistakes the gateway would reject.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] if the token is empty, a currency is
    /// [`CurrencyCode::Unknown`], or `is_3ds_order` is set without [`ThreeDSecureInfo`].
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(WorldpayError::Validation("token must not be empty".to_owned()));
        }
        if self.currency_code == CurrencyCode::Unknown
            || self.settlement_currency == Some(CurrencyCode::Unknown)
        {
            return Err(WorldpayError::Validation(
                "currency code must be a known ISO 4217 code".to_owned(),
            ));
        }
        if self.is_3ds_order && self.three_d_secure_info.is_none() {
            return Err(WorldpayError::Validation(
                "threeDSecureInfo is required when is3DSOrder is true".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Shopper session data captured from the browser for 3-D Secure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureInfo {
    /// `Accept` header sent by the shopper's browser.
    pub shopper_accept_header: String,
    /// Shopper's IP address.
    pub shopper_ip_address: String,
    /// Merchant session id for the shopper.
    pub shopper_session_id: String,
    /// `User-Agent` header sent by the shopper's browser.
    pub shopper_user_agent: String,
}

/// Request body for `PUT /orders/{orderCode}` completing a 3-D Secure order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAuthorizationRequest {
    /// Result of the issuer challenge, e.g. `IDENTIFIED`.
    #[serde(rename = "threeDSResponseCode")]
    pub three_ds_response_code: String,
    /// The same session data sent when the order was created.
    pub three_d_secure_info: ThreeDSecureInfo,
}

impl OrderAuthorizationRequest {
    /// Creates an authorization request.
    pub fn new(response_code: impl Into<String>, info: ThreeDSecureInfo) -> Self {
        Self { three_ds_response_code: response_code.into(), three_d_secure_info: info }
    }
}

/// Request body for `POST /orders/{orderCode}/capture`.
///
/// An absent amount captures the full authorized amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderRequest {
    /// Amount to capture in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_amount: Option<u64>,
}

impl CaptureOrderRequest {
    /// Captures the full authorized amount.
    #[must_use]
    pub fn full() -> Self {
        Self { capture_amount: None }
    }

    /// Captures part of the authorized amount.
    #[must_use]
    pub fn partial(amount: u64) -> Self {
        Self { capture_amount: Some(amount) }
    }
}

/// Request body for `POST /orders/{orderCode}/refund` with a partial amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundOrderRequest {
    /// Amount to refund in minor units.
    pub refund_amount: u64,
}

/// Order snapshot returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Gateway-assigned order code.
    pub order_code: String,
    /// Token the order was paid with.
    #[serde(default)]
    pub token: Option<String>,
    /// Description from the request.
    #[serde(default)]
    pub order_description: Option<String>,
    /// Captured amount in minor units; zero until an authorize-only order is captured.
    #[serde(default)]
    pub amount: u64,
    /// Amount authorized at creation.
    #[serde(default)]
    pub authorized_amount: Option<u64>,
    /// Order currency.
    #[serde(default)]
    pub currency_code: Option<CurrencyCode>,
    /// Current status.
    #[serde(default)]
    pub payment_status: OrderStatus,
    /// Payment method details.
    #[serde(default)]
    pub payment_response: Option<PaymentResponse>,
    /// Merchant's own order reference.
    #[serde(default)]
    pub customer_order_code: Option<String>,
    /// Identifiers echoed back at the top level.
    #[serde(default, with = "entries_as_map")]
    pub customer_identifiers: Vec<Entry>,
    /// Identifiers echoed back in the key/value block.
    #[serde(default)]
    pub key_value_response: Option<KeyValueResponse>,
    /// Environment that processed the order.
    #[serde(default)]
    pub environment: Option<Environment>,
    /// Fraud risk assessment.
    #[serde(default)]
    pub risk_score: Option<RiskScore>,
    /// Issuer challenge URL for 3-D Secure orders.
    #[serde(rename = "redirectURL", default)]
    pub redirect_url: Option<String>,
    /// Token to post to the challenge URL.
    #[serde(rename = "oneTime3DsToken", default)]
    pub one_time_3ds_token: Option<String>,
    /// Settlement currency.
    #[serde(default)]
    pub settlement_currency: Option<CurrencyCode>,
    /// Shopper's email address.
    #[serde(default)]
    pub shopper_email_address: Option<String>,
    /// Order type.
    #[serde(default)]
    pub order_type: Option<OrderType>,
    /// Whether the order went through 3-D Secure.
    #[serde(rename = "is3DSOrder", default)]
    pub is_3ds_order: Option<bool>,
}

/// Key/value block of an order response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueResponse {
    /// Customer identifiers in the order they were sent.
    #[serde(default, with = "entries_as_map")]
    pub customer_identifiers: Vec<Entry>,
}

/// Payment method details, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum PaymentResponse {
    /// Card details with the number masked.
    ObfuscatedCard(CardResponse),
    /// Alternative payment method.
    #[serde(rename = "APM")]
    Apm(ApmResponse),
    /// Payment type not known to this SDK version.
    #[serde(other)]
    Other,
}

impl PaymentResponse {
    /// Returns the card details for card payments.
    #[must_use]
    pub fn as_card(&self) -> Option<&CardResponse> {
        match self {
            Self::ObfuscatedCard(card) => Some(card),
            _ => None,
        }
    }
}

/// Obfuscated card as reported by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    /// Cardholder name.
    #[serde(default)]
    pub name: Option<String>,
    /// Expiry month (1-12).
    #[serde(default)]
    pub expiry_month: Option<u8>,
    /// Four-digit expiry year.
    #[serde(default)]
    pub expiry_year: Option<u16>,
    /// Scheme and product, e.g. `MASTERCARD_CREDIT`.
    #[serde(default)]
    pub card_type: Option<String>,
    /// Masked card number.
    #[serde(default)]
    pub masked_card_number: Option<String>,
    /// Issue number (Maestro).
    #[serde(default)]
    pub issue_number: Option<u8>,
    /// Start month (Maestro).
    #[serde(default)]
    pub start_month: Option<u8>,
    /// Start year (Maestro).
    #[serde(default)]
    pub start_year: Option<u16>,
    /// Issuing bank's country.
    #[serde(default)]
    pub card_issuer: Option<String>,
    /// Card scheme, e.g. `MASTERCARD`.
    #[serde(default)]
    pub card_scheme_type: Option<String>,
    /// Scheme product name.
    #[serde(default)]
    pub card_scheme_name: Option<String>,
    /// Card product type, e.g. `CONSUMER`.
    #[serde(default)]
    pub card_product_type_desc_non_contactless: Option<String>,
    /// Credit, debit or prepaid.
    #[serde(default)]
    pub card_class: Option<String>,
    /// Prepaid indicator.
    #[serde(default)]
    pub prepaid: Option<String>,
}

/// Alternative payment method details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApmResponse {
    /// APM name, e.g. `paypal`.
    #[serde(default)]
    pub apm_name: Option<String>,
    /// Shopper's country.
    #[serde(default)]
    pub shopper_country_code: Option<String>,
    /// Where the shopper returns after a successful payment.
    #[serde(default)]
    pub success_url: Option<String>,
    /// Where the shopper returns after a cancelled payment.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Where the shopper returns after a failed payment.
    #[serde(default)]
    pub failure_url: Option<String>,
    /// Where the shopper returns while the payment is pending.
    #[serde(default)]
    pub pending_url: Option<String>,
    /// APM-specific fields.
    #[serde(default, with = "entries_as_map")]
    pub apm_fields: Vec<Entry>,
}

/// Fraud risk assessment attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// Score value as reported by the gateway.
    #[serde(default)]
    pub value: Option<String>,
}

/// Result of `GET /orders/{orderCode}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Current order snapshot.
    pub order_response: OrderResponse,
}

/// Order status as reported in `paymentStatus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Awaiting 3-D Secure authorization.
    PreAuthorized,
    /// Funds authorized, not captured.
    Authorized,
    /// Paid.
    Success,
    /// Authorization released.
    Cancelled,
    /// Payment declined or errored.
    Failed,
    /// Fully refunded.
    Refunded,
    /// Partially refunded.
    PartiallyRefunded,
    /// Refund submitted to the acquirer.
    SentForRefund,
    /// Funds settled to the merchant.
    Settled,
    /// Disputed by the cardholder and reversed.
    ChargedBack,
    /// Issuer asked for dispute information.
    InformationRequested,
    /// Dispute information supplied.
    InformationSupplied,
    /// Authorization expired before capture.
    Expired,
    /// Status not known to this SDK version.
    #[default]
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreAuthorized => "PRE_AUTHORIZED",
            Self::Authorized => "AUTHORIZED",
            Self::Success => "SUCCESS",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
            Self::PartiallyRefunded => "PARTIALLY_REFUNDED",
            Self::SentForRefund => "SENT_FOR_REFUND",
            Self::Settled => "SETTLED",
            Self::ChargedBack => "CHARGED_BACK",
            Self::InformationRequested => "INFORMATION_REQUESTED",
            Self::InformationSupplied => "INFORMATION_SUPPLIED",
            Self::Expired => "EXPIRED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel an order came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// E-commerce.
    Ecom,
    /// Mail order / telephone order.
    Moto,
    /// Merchant-initiated recurring payment.
    Recurring,
    /// Type not known to this SDK version.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::CountryCode;

    fn three_ds_info() -> ThreeDSecureInfo {
        ThreeDSecureInfo {
            shopper_accept_header: "text/html".to_owned(),
            shopper_ip_address: "195.35.90.111".to_owned(),
            shopper_session_id: "021ui8ib1".to_owned(),
            shopper_user_agent: "Mozilla/5.0".to_owned(),
        }
    }

    #[test]
    fn test_order_request_minimal_wire_format() {
        let request = OrderRequest::new("token-1", 1999, CurrencyCode::GBP, "test description");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "token": "token-1",
                "orderDescription": "test description",
                "amount": 1999,
                "currencyCode": "GBP",
                "is3DSOrder": false,
                "authorizeOnly": false
            })
        );
    }

    #[test]
    fn test_order_request_full_wire_format() {
        let request = OrderRequest::new("token-1", 1999, CurrencyCode::GBP, "test description")
            .with_name("test name")
            .with_billing_address(Address {
                address1: "line 1".to_owned(),
                address2: None,
                address3: None,
                postal_code: "AB1 2CD".to_owned(),
                city: "city".to_owned(),
                state: None,
                country_code: CountryCode::GB,
                telephone_number: None,
            })
            .with_customer_identifier("test key 1", "test value 1")
            .with_order_type(OrderType::Ecom)
            .with_three_d_secure(three_ds_info())
            .with_settlement_currency(CurrencyCode::GBP);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["is3DSOrder"], json!(true));
        assert_eq!(value["threeDSecureInfo"]["shopperIpAddress"], json!("195.35.90.111"));
        assert_eq!(value["customerIdentifiers"], json!({"test key 1": "test value 1"}));
        assert_eq!(value["billingAddress"]["countryCode"], json!("GB"));
        assert_eq!(value["orderType"], json!("ECOM"));
        assert_eq!(value["settlementCurrency"], json!("GBP"));
        assert!(value.get("deliveryAddress").is_none());
    }

    #[test]
    fn test_validate_rejects_3ds_without_info() {
        let mut request = OrderRequest::new("token-1", 1999, CurrencyCode::GBP, "d");
        request.is_3ds_order = true;

        let err = request.validate().unwrap_err();
        assert!(matches!(err, WorldpayError::Validation(_)));
        assert!(err.to_string().contains("threeDSecureInfo"));
    }

    #[test]
    fn test_validate_rejects_unknown_currency() {
        let request = OrderRequest::new("token-1", 1999, CurrencyCode::Unknown, "d");
        assert!(matches!(request.validate(), Err(WorldpayError::Validation(_))));

        let request = OrderRequest::new("token-1", 1999, CurrencyCode::GBP, "d")
            .with_settlement_currency(CurrencyCode::Unknown);
        assert!(matches!(request.validate(), Err(WorldpayError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let request = OrderRequest::new("  ", 1999, CurrencyCode::GBP, "d");
        assert!(matches!(request.validate(), Err(WorldpayError::Validation(_))));
    }

    #[test]
    fn test_authorization_request_wire_format() {
        let request = OrderAuthorizationRequest::new("IDENTIFIED", three_ds_info());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["threeDSResponseCode"], json!("IDENTIFIED"));
        assert_eq!(value["threeDSecureInfo"]["shopperSessionId"], json!("021ui8ib1"));
    }

    #[test]
    fn test_capture_request_omits_absent_amount() {
        assert_eq!(serde_json::to_string(&CaptureOrderRequest::full()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&CaptureOrderRequest::partial(900)).unwrap(),
            r#"{"captureAmount":900}"#
        );
        assert_eq!(
            serde_json::to_string(&RefundOrderRequest { refund_amount: 500 }).unwrap(),
            r#"{"refundAmount":500}"#
        );
    }

    #[test]
    fn test_order_response_from_gateway_json() {
        let body = json!({
            "orderCode": "8b8f6e0a-7a5e-4b1b-9b7e-2a8b4d3e2f10",
            "token": "TEST_SU_token",
            "orderDescription": "test description",
            "amount": 1999,
            "currencyCode": "GBP",
            "paymentStatus": "SUCCESS",
            "paymentResponse": {
                "type": "ObfuscatedCard",
                "name": "javalib client",
                "expiryMonth": 2,
                "expiryYear": 2018,
                "cardType": "MASTERCARD_CREDIT",
                "maskedCardNumber": "**** **** **** 4444"
            },
            "customerIdentifiers": {"test key 1": "test value 1"},
            "keyValueResponse": {"customerIdentifiers": {"test key 1": "test value 1"}},
            "environment": "TEST",
            "riskScore": {"value": "1"},
            "is3DSOrder": false
        });

        let order: OrderResponse = serde_json::from_value(body).unwrap();
        assert_eq!(order.amount, 1999);
        assert_eq!(order.payment_status, OrderStatus::Success);
        assert_eq!(order.environment, Some(Environment::Test));
        let card = order.payment_response.as_ref().and_then(PaymentResponse::as_card).unwrap();
        assert_eq!(card.card_type.as_deref(), Some("MASTERCARD_CREDIT"));
        assert_eq!(
            order.key_value_response.unwrap().customer_identifiers,
            vec![Entry::new("test key 1", "test value 1")]
        );
    }

    #[test]
    fn test_order_response_3ds_fields() {
        let body = json!({
            "orderCode": "abc",
            "amount": 1999,
            "paymentStatus": "PRE_AUTHORIZED",
            "redirectURL": "https://acs.example.com/challenge",
            "oneTime3DsToken": "PaRes-token"
        });

        let order: OrderResponse = serde_json::from_value(body).unwrap();
        assert_eq!(order.payment_status, OrderStatus::PreAuthorized);
        assert_eq!(order.redirect_url.as_deref(), Some("https://acs.example.com/challenge"));
        assert_eq!(order.one_time_3ds_token.as_deref(), Some("PaRes-token"));
        assert!(order.customer_identifiers.is_empty());
    }

    #[test]
    fn test_unknown_values_do_not_fail_decoding() {
        let body = json!({
            "orderCode": "abc",
            "amount": 0,
            "authorizedAmount": 1999,
            "currencyCode": "XTS",
            "paymentStatus": "SOMETHING_NEW",
            "orderType": "MAIL",
            "paymentResponse": {"type": "Wallet", "walletId": "w1"}
        });

        let order: OrderResponse = serde_json::from_value(body).unwrap();
        assert_eq!(order.payment_status, OrderStatus::Unknown);
        assert_eq!(order.currency_code, Some(CurrencyCode::Unknown));
        assert_eq!(order.order_type, Some(OrderType::Unknown));
        assert_eq!(order.payment_response, Some(PaymentResponse::Other));
        assert_eq!(order.authorized_amount, Some(1999));
    }

    #[test]
    fn test_apm_payment_response() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "type": "APM",
            "apmName": "paypal",
            "shopperCountryCode": "GB",
            "apmFields": {"foo": "bar"}
        }))
        .unwrap();

        let PaymentResponse::Apm(apm) = response else {
            panic!("expected APM response");
        };
        assert_eq!(apm.apm_name.as_deref(), Some("paypal"));
        assert_eq!(apm.apm_fields, vec![Entry::new("foo", "bar")]);
    }

    #[test]
    fn test_order_status_wire_names() {
        for status in [
            OrderStatus::PreAuthorized,
            OrderStatus::Authorized,
            OrderStatus::Success,
            OrderStatus::Cancelled,
            OrderStatus::Failed,
            OrderStatus::Refunded,
            OrderStatus::PartiallyRefunded,
            OrderStatus::SentForRefund,
            OrderStatus::Settled,
            OrderStatus::ChargedBack,
            OrderStatus::InformationRequested,
            OrderStatus::InformationSupplied,
            OrderStatus::Expired,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_transaction_wraps_order_response() {
        let transaction: Transaction = serde_json::from_value(json!({
            "orderResponse": {"orderCode": "abc", "amount": 900, "authorizedAmount": 1999,
                              "paymentStatus": "SUCCESS"}
        }))
        .unwrap();
        assert_eq!(transaction.order_response.amount, 900);
        assert_eq!(transaction.order_response.authorized_amount, Some(1999));
    }
}
