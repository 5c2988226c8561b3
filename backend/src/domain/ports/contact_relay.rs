//! Driven port for delivering accepted enquiries to the form relay.
//!
//! The domain owns the submission shape; adapters own the credential, the
//! endpoint and the wire encoding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;

/// One enquiry ready for delivery. All text fields are already sanitised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySubmission {
    /// Sender's name.
    pub name: String,
    /// Sender's email.
    pub email: String,
    /// Phone, or the "not provided" placeholder.
    pub phone: String,
    /// Company, or the "not provided" placeholder.
    pub company: String,
    /// Enquiry body.
    pub message: String,
    /// Subject line for the relayed email.
    pub subject: String,
    /// Sender label shown by the relay.
    pub from_name: String,
    /// When the submission was accepted.
    pub submitted_at: DateTime<Utc>,
    /// Fixed tag identifying the originating form.
    pub source: String,
}

/// Relay acknowledgement for a delivered enquiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayReceipt {
    /// Optional message returned by the relay.
    pub message: Option<String>,
}

define_port_error! {
    /// Errors surfaced while delivering to the relay.
    pub enum ContactRelayError {
        /// No access credential is configured.
        NotConfigured => "contact relay access key is not configured",
        /// The request never produced a response.
        Transport { message: String } => "contact relay transport failed: {message}",
        /// The relay did not answer in time.
        Timeout { message: String } => "contact relay timed out: {message}",
        /// The relay answered but refused the submission.
        Rejected { message: String } => "contact relay rejected submission: {message}",
        /// The relay's response could not be decoded.
        Decode { message: String } => "contact relay response decode failed: {message}",
    }
}

/// Port for handing an enquiry to the external relay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    /// Deliver one enquiry. Called at most once per submission; no retries.
    async fn deliver(&self, submission: &RelaySubmission)
    -> Result<RelayReceipt, ContactRelayError>;
}

/// Relay used when no access key is configured.
///
/// Every delivery fails with [`ContactRelayError::NotConfigured`], so the
/// site keeps serving while visitors see the generic failure notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredContactRelay;

#[async_trait]
impl ContactRelay for UnconfiguredContactRelay {
    async fn deliver(
        &self,
        _submission: &RelaySubmission,
    ) -> Result<RelayReceipt, ContactRelayError> {
        Err(ContactRelayError::not_configured())
    }
}

/// Relay that accepts everything without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureContactRelay;

#[async_trait]
impl ContactRelay for FixtureContactRelay {
    async fn deliver(
        &self,
        _submission: &RelaySubmission,
    ) -> Result<RelayReceipt, ContactRelayError> {
        Ok(RelayReceipt::default())
    }
}
