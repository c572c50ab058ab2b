//! Token DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::order::PaymentResponse;
use crate::error::{Result, WorldpayError};

/// Request body for the token endpoint.
///
/// Authenticated by `clientKey`; the service key is never sent with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Merchant's client key.
    pub client_key: String,
    /// Whether the token survives its first use.
    #[serde(default)]
    pub reusable: bool,
    /// Card to tokenize.
    pub payment_method: PaymentMethod,
}

impl TokenRequest {
    /// Creates a single-use card token request.
    pub fn new(client_key: impl Into<String>, card: CardRequest) -> Self {
        Self {
            client_key: client_key.into(),
            reusable: false,
            payment_method: PaymentMethod::Card(card),
        }
    }

    /// Makes the token reusable.
    #[must_use]
    pub fn reusable(mut self) -> Self {
        self.reusable = true;
        self
    }

    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] if the client key is empty or the card is
    /// malformed.
    pub fn validate(&self) -> Result<()> {
        if self.client_key.trim().is_empty() {
            return Err(WorldpayError::Validation("client key must not be empty".to_owned()));
        }
        match &self.payment_method {
            PaymentMethod::Card(card) => card.validate(),
        }
    }
}

/// Payment method to tokenize, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentMethod {
    /// Card details.
    Card(CardRequest),
}

/// Raw card details.
///
/// `Debug` masks the card number and omits the CVC.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Cardholder name.
    pub name: String,
    /// Expiry month (1-12).
    pub expiry_month: u8,
    /// Four-digit expiry year.
    pub expiry_year: u16,
    /// Card number; spaces are accepted.
    pub card_number: String,
    /// Card verification code.
    pub cvc: String,
    /// Issue number (Maestro).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u8>,
    /// Start month (Maestro).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u8>,
    /// Start year (Maestro).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<u16>,
}

impl CardRequest {
    /// Creates card details without Maestro fields.
    pub fn new(
        name: impl Into<String>,
        card_number: impl Into<String>,
        cvc: impl Into<String>,
        expiry_month: u8,
        expiry_year: u16,
    ) -> Self {
        Self {
            name: name.into(),
            expiry_month,
            expiry_year,
            card_number: card_number.into(),
            cvc: cvc.into(),
            issue_number: None,
            start_month: None,
            start_year: None,
        }
    }

    /// Returns the last four digits of the card number.
    #[must_use]
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }

    fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.expiry_month) {
            return Err(WorldpayError::Validation(format!(
                "expiry month must be between 1 and 12, got {}",
                self.expiry_month
            )));
        }
        if let Some(month) = self.start_month
            && !(1..=12).contains(&month)
        {
            return Err(WorldpayError::Validation(format!(
                "start month must be between 1 and 12, got {month}"
            )));
        }
        if !self.card_number.chars().all(|c| c.is_ascii_digit() || c == ' ')
            || !self.card_number.chars().any(|c| c.is_ascii_digit())
        {
            return Err(WorldpayError::Validation(
                "card number must contain only digits and spaces".to_owned(),
            ));
        }
        if !self.cvc.is_empty() && !self.cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(WorldpayError::Validation("CVC must contain only digits".to_owned()));
        }
        Ok(())
    }
}

impl fmt::Debug for CardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRequest")
            .field("name", &self.name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("cvc", &"[REDACTED]")
            .field("issue_number", &self.issue_number)
            .field("start_month", &self.start_month)
            .field("start_year", &self.start_year)
            .finish()
    }
}

/// Request body for `PUT /tokens/{token}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCvcRequest<'a> {
    pub(crate) cvc: &'a str,
    pub(crate) client_key: &'a str,
}

/// Token issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Opaque token to use in [`OrderRequest`](super::OrderRequest).
    pub token: String,
    /// Whether the token survives its first use.
    #[serde(default)]
    pub reusable: bool,
    /// Obfuscated payment method.
    #[serde(default)]
    pub payment_method: Option<PaymentResponse>,
}
