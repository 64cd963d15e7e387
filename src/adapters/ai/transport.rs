//! HTTP helpers shared by the hosted generation clients.

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::ports::TransportFailure;

/// Default wait reported for a 429 without a usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Builds the HTTP client with the configured timeout.
pub(super) fn build_http_client(timeout: Duration) -> Result<Client, TransportFailure> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TransportFailure::invalid_request(format!("HTTP client setup failed: {}", e)))
}

/// Maps a reqwest send failure onto the transport taxonomy. The request
/// URL is stripped from the message.
pub(super) fn map_send_error(err: reqwest::Error, timeout: Duration) -> TransportFailure {
    let err = err.without_url();
    if err.is_timeout() {
        TransportFailure::timeout(timeout.as_secs())
    } else if err.is_connect() {
        TransportFailure::network(format!("Connection failed: {}", err))
    } else {
        TransportFailure::network(err.to_string())
    }
}

/// Passes 2xx responses through; everything else becomes a failure.
pub(super) async fn check_status(response: Response) -> Result<Response, TransportFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(failure_for_status(status, retry_after, body))
}

/// Status-code classification: 401/403 auth, 429 rate limited, 400 invalid
/// request, 5xx unavailable, anything else network.
pub(super) fn failure_for_status(
    status: StatusCode,
    retry_after: Option<u32>,
    body: String,
) -> TransportFailure {
    match status.as_u16() {
        401 | 403 => TransportFailure::AuthenticationFailed,
        429 => TransportFailure::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        400 => TransportFailure::InvalidRequest(body),
        500..=599 => TransportFailure::unavailable(format!("Server error {}: {}", status, body)),
        _ => TransportFailure::network(format!("Unexpected status {}: {}", status, body)),
    }
}
