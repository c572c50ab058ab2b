//! Transfer lookups.

use tracing::instrument;

use super::{Gateway, require_id};
use crate::{
    endpoint::{EndpointResolver, build_url_with_query},
    error::{Result, WorldpayError},
    model::{TransferDetailResponse, TransferSearchResponse},
    response::decode,
    transport::HttpMethod,
};

/// Client for the `/transfers` resource.
#[derive(Debug, Clone)]
pub struct TransferService {
    gateway: Gateway,
}

impl TransferService {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Lists one page of a merchant's transfers.
    ///
    /// Pages are numbered from 1.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the merchant id is blank or `page` is 0.
    /// - [`WorldpayError::Api`] if the gateway rejects the search.
    #[instrument(skip(self))]
    pub async fn search(&self, merchant_id: &str, page: u32) -> Result<TransferSearchResponse> {
        require_id("merchant id", merchant_id)?;
        if page == 0 {
            return Err(WorldpayError::Validation("page numbers start at 1".to_owned()));
        }

        let page = page.to_string();
        let path = build_url_with_query(
            &self.gateway.endpoints().transfers_endpoint(),
            &[("merchantId", merchant_id), ("pageNumber", &page)],
        );
        let response = self.gateway.send::<()>(HttpMethod::Get, &path, None).await?;
        decode(&response)
    }

    /// Lists one page of the configured merchant's transfers.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Config`] if no merchant id is configured.
    /// - Otherwise as [`search`](Self::search).
    pub async fn search_own(&self, page: u32) -> Result<TransferSearchResponse> {
        let merchant_id = self
            .gateway
            .config()
            .merchant_id
            .clone()
            .ok_or_else(|| WorldpayError::Config("merchant id is not configured".to_owned()))?;
        self.search(&merchant_id, page).await
    }

    /// Fetches one transfer.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the transfer id is blank.
    /// - [`WorldpayError::Api`] if the transfer does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, transfer_id: &str) -> Result<TransferDetailResponse> {
        require_id("transfer id", transfer_id)?;

        let path = self.gateway.endpoints().transfer_endpoint(transfer_id);
        let response = self.gateway.send::<()>(HttpMethod::Get, &path, None).await?;
        decode(&response)
    }
}
