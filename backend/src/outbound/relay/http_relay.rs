//! Reqwest-backed contact relay adapter.
//!
//! This adapter owns transport details only: payload encoding, the access
//! key, timeout and HTTP error mapping, and decoding the relay's verdict.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{RelayRequestDto, RelayResponseDto};
use crate::domain::ports::{ContactRelay, ContactRelayError, RelayReceipt, RelaySubmission};

const DEFAULT_USER_AGENT: &str = "site-backend-contact-relay/0.1";
const FALLBACK_REJECTION: &str = "Failed to send message";

/// Relay adapter that POSTs JSON enquiries to one endpoint.
pub struct HttpContactRelay {
    client: Client,
    endpoint: Url,
    access_key: Zeroizing<String>,
}

impl HttpContactRelay {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    /// ```rust,ignore
    /// let relay = HttpContactRelay::new(endpoint, "access-key", timeout);
    /// assert!(relay.is_ok() || relay.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            access_key: Zeroizing::new(access_key.into()),
        })
    }
}

#[async_trait]
impl ContactRelay for HttpContactRelay {
    async fn deliver(
        &self,
        submission: &RelaySubmission,
    ) -> Result<RelayReceipt, ContactRelayError> {
        let payload = RelayRequestDto::new(self.access_key.as_str(), submission);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "contact relay responded");
        interpret_response(status, body.as_ref())
    }
}

fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<RelayReceipt, ContactRelayError> {
    let decoded = serde_json::from_slice::<RelayResponseDto>(body);
    if !status.is_success() {
        let message = decoded
            .ok()
            .and_then(|dto| dto.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| status_message(status, body));
        return Err(ContactRelayError::rejected(message));
    }

    let dto = decoded.map_err(|error| {
        ContactRelayError::decode(format!("invalid relay JSON payload: {error}"))
    })?;
    if !dto.success {
        return Err(ContactRelayError::rejected(
            dto.message.unwrap_or_else(|| FALLBACK_REJECTION.to_owned()),
        ));
    }
    Ok(RelayReceipt {
        message: dto.message,
    })
}

fn map_transport_error(error: reqwest::Error) -> ContactRelayError {
    if error.is_timeout() {
        ContactRelayError::timeout(error.to_string())
    } else {
        ContactRelayError::transport(error.to_string())
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("{FALLBACK_REJECTION} (status {})", status.as_u16())
    } else {
        format!("{FALLBACK_REJECTION} (status {}): {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
