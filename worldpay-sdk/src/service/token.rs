//! Token operations.

use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use super::{Auth, Gateway, require_id};
use crate::{
    endpoint::EndpointResolver,
    error::{Result, WorldpayError},
    model::{CardRequest, TokenRequest, TokenResponse, token::UpdateCvcRequest},
    response::{decode, expect_success},
    transport::HttpMethod,
};

/// Client for the token endpoint and the `/tokens` resource.
#[derive(Debug, Clone)]
pub struct TokenService {
    gateway: Gateway,
}

impl TokenService {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Exchanges card details for a token.
    ///
    /// Posted to the configured token URL and authenticated by the request's client
    /// key; the service key is not sent.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the client key is blank or the card is malformed.
    /// - [`WorldpayError::Api`] if the gateway rejects the card or the key.
    #[instrument(skip_all, fields(reusable = request.reusable))]
    pub async fn create(&self, request: &TokenRequest) -> Result<TokenResponse> {
        request.validate()?;

        let token_url = self.gateway.config().token_url();
        let response = self
            .gateway
            .send_to(&token_url, HttpMethod::Post, "", Some(request), Auth::Body)
            .await?;
        let token: TokenResponse = decode(&response)?;

        debug!(reusable = token.reusable, "token created");
        Ok(token)
    }

    /// Tokenizes a card with the configured client key.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Config`] if no client key is configured.
    /// - Otherwise as [`create`](Self::create).
    pub async fn tokenize(&self, card: CardRequest, reusable: bool) -> Result<TokenResponse> {
        let mut request = TokenRequest::new(self.client_key()?, card);
        request.reusable = reusable;
        self.create(&request).await
    }

    /// Fetches the details of a token.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the token is blank.
    /// - [`WorldpayError::Api`] with custom code `TKN_NOT_FOUND` if the token is unknown.
    #[instrument(skip_all)]
    pub async fn get(&self, token: &str) -> Result<TokenResponse> {
        require_id("token", token)?;

        let path = self.gateway.endpoints().token_endpoint(token);
        let response = self.gateway.send::<()>(HttpMethod::Get, &path, None).await?;
        decode(&response)
    }

    /// Attaches a fresh CVC to a reusable token.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the token or CVC is blank.
    /// - [`WorldpayError::Config`] if no client key is configured.
    /// - [`WorldpayError::Api`] if the gateway rejects the update.
    #[instrument(skip_all)]
    pub async fn update_cvc(&self, token: &str, cvc: &str) -> Result<()> {
        require_id("token", token)?;
        require_id("CVC", cvc)?;
        let client_key = self.client_key()?;

        let path = self.gateway.endpoints().token_endpoint(token);
        let body = UpdateCvcRequest { cvc, client_key: &client_key };
        let response = self.gateway.send(HttpMethod::Put, &path, Some(&body)).await?;
        expect_success(&response)
    }

    /// Deletes a token.
    ///
    /// # Errors
    ///
    /// - [`WorldpayError::Validation`] if the token is blank.
    /// - [`WorldpayError::Api`] if the token is unknown.
    #[instrument(skip_all)]
    pub async fn delete(&self, token: &str) -> Result<()> {
        require_id("token", token)?;

        let path = self.gateway.endpoints().token_endpoint(token);
        let response = self.gateway.send::<()>(HttpMethod::Delete, &path, None).await?;
        expect_success(&response)?;

        debug!("token deleted");
        Ok(())
    }

    fn client_key(&self) -> Result<String> {
        self.gateway
            .config()
            .client_key
            .as_ref()
            .map(|key| key.expose_secret().clone())
            .ok_or_else(|| WorldpayError::Config("client key is not configured".to_owned()))
    }
}
