//! Response handling.
//!
//! Turns a [`TransportResponse`] into either a decoded DTO or a
//! [`WorldpayError::Api`]. Every non-2xx status yields exactly one [`ApiError`]:
//! the gateway's envelope when the body parses as one, a synthesized envelope
//! otherwise.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{
    error::{ApiError, Result, UNKNOWN_ERROR, WorldpayError},
    transport::TransportResponse,
};

/// Maps a non-2xx response to its [`ApiError`].
///
/// A missing `httpStatusCode` in the body is filled from the response status and a
/// missing `customCode` becomes [`UNKNOWN_ERROR`].
#[must_use]
pub fn error_envelope(response: &TransportResponse) -> ApiError {
    if response.is_body_empty() {
        return ApiError::unparsed(response.status, &response.body);
    }
    match serde_json::from_slice::<ApiError>(&response.body) {
        Ok(mut envelope) if !envelope.custom_code.is_empty() || !envelope.message.is_empty() => {
            envelope.http_status_code.get_or_insert(response.status);
            if envelope.custom_code.is_empty() {
                UNKNOWN_ERROR.clone_into(&mut envelope.custom_code);
            }
            envelope
        }
        _ => ApiError::unparsed(response.status, &response.body),
    }
}

/// Returns `Ok(())` for 2xx responses and the mapped [`WorldpayError::Api`] otherwise.
///
/// # Errors
///
/// Returns [`WorldpayError::Api`] for any non-2xx status.
pub fn expect_success(response: &TransportResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let envelope = error_envelope(response);
    warn!(
        status = response.status,
        custom_code = %envelope.custom_code,
        error_message = %envelope.message,
        "gateway returned an error"
    );
    Err(WorldpayError::Api(envelope))
}

/// Decodes a 2xx response body into `T`.
///
/// # Errors
///
/// Returns [`WorldpayError::Api`] for non-2xx statuses and
/// [`WorldpayError::Serialization`] if a 2xx body does not match `T`.
pub fn decode<T: DeserializeOwned>(response: &TransportResponse) -> Result<T> {
    expect_success(response)?;
    Ok(serde_json::from_slice(&response.body)?)
}
