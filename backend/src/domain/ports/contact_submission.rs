//! Driving port for contact form submission.
//!
//! Inbound adapters hand the raw form plus the visitor's key-value store to
//! [`ContactSubmission::submit`] and render whichever outcome comes back.
//! Every error variant carries a visitor-safe notice via `Display`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ContactRelayError, KeyValueStore};
use crate::domain::contact::{ContactForm, FormValidation};
use crate::domain::rate_limit::RateLimited;

/// Notice shown when a submission was relayed.
pub const SUCCESS_NOTICE: &str = "Thank you for your inquiry! We'll be in touch within 24 hours.";

/// A contact form submission as received from a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmissionRequest {
    /// The visible form fields.
    pub form: ContactForm,
    /// Hidden bot-trap field; humans leave it empty.
    pub honeypot: Option<String>,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmissionAccepted {
    /// Notice to show the visitor.
    pub notice: String,
    /// Timestamp sent to the relay and recorded for the cooldown.
    pub submitted_at: DateTime<Utc>,
}

/// Why a submission was not relayed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContactSubmissionError {
    /// The honeypot was filled in. Deliberately vague.
    #[error("Submission failed. Please try again.")]
    SuspectedBot,
    /// The visitor submitted within the cooldown window.
    #[error(transparent)]
    RateLimited(#[from] RateLimited),
    /// One or more fields failed validation.
    #[error("{}", invalid_notice(.0))]
    Invalid(FormValidation),
    /// The relay could not take the enquiry.
    #[error(
        "Sorry, there was an error sending your message. Please try again or contact us directly at {fallback_email}"
    )]
    Delivery {
        /// Underlying relay failure, for logs only.
        #[source]
        source: ContactRelayError,
        /// Address visitors can email instead.
        fallback_email: String,
    },
}

fn invalid_notice(validation: &FormValidation) -> String {
    validation.first_error().map_or_else(
        || "Please check your form inputs".to_owned(),
        ToString::to_string,
    )
}

/// Use case for accepting a contact form submission.
#[async_trait(?Send)]
pub trait ContactSubmission: Send + Sync {
    /// Screen, validate, sanitise and relay one submission.
    ///
    /// `store` holds the visitor's cooldown record; it is only written after
    /// the relay accepts the enquiry.
    ///
    /// # Errors
    ///
    /// Returns [`ContactSubmissionError`] when the honeypot trips, the
    /// cooldown is active, validation fails or delivery fails.
    async fn submit(
        &self,
        store: &dyn KeyValueStore,
        request: ContactSubmissionRequest,
    ) -> Result<ContactSubmissionAccepted, ContactSubmissionError>;
}
