//! Transfer DTOs.
//!
//! Transfers are settlements paid out to the merchant's bank account. They are
//! read-only through the API.

use serde::{Deserialize, Serialize};

use super::common::CurrencyCode;

/// One page of `GET /transfers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSearchResponse {
    /// Transfers on this page.
    #[serde(default)]
    pub transfers: Vec<TransferSummary>,
    /// 1-based page number.
    #[serde(default)]
    pub page_number: u32,
    /// Total number of pages.
    #[serde(default)]
    pub number_of_pages: u32,
    /// Total number of transfers across all pages.
    #[serde(default)]
    pub number_of_transfers: u64,
}

impl TransferSearchResponse {
    /// Returns true if a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.number_of_pages
    }
}

/// Transfer entry in a search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    /// Transfer id.
    pub transfer_id: String,
    /// Amount transferred in minor units.
    #[serde(default)]
    pub amount: i64,
    /// Currency transferred.
    #[serde(default)]
    pub currency_code: Option<CurrencyCode>,
    /// Transfer status as reported by the gateway.
    #[serde(default)]
    pub status: Option<String>,
    /// Date the transfer was made.
    #[serde(default)]
    pub transfer_date: Option<String>,
}

/// Full transfer from `GET /transfers/{transferId}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDetailResponse {
    /// Transfer id.
    pub transfer_id: String,
    /// Merchant the transfer belongs to.
    #[serde(default)]
    pub merchant_id: Option<String>,
    /// Net amount transferred in minor units.
    #[serde(default)]
    pub amount: i64,
    /// Currency transferred.
    #[serde(default)]
    pub currency_code: Option<CurrencyCode>,
    /// Transfer status as reported by the gateway.
    #[serde(default)]
    pub status: Option<String>,
    /// Date the transfer was made.
    #[serde(default)]
    pub transfer_date: Option<String>,
    /// Gross amount of the settled orders.
    #[serde(default)]
    pub gross_amount: Option<i64>,
    /// Fees deducted.
    #[serde(default)]
    pub fees: Option<i64>,
    /// Orders settled by this transfer.
    #[serde(default)]
    pub order_codes: Vec<String>,
}
