//! Contact submission use case.
//!
//! Screens out bots, enforces the cooldown, validates, sanitises and hands
//! the enquiry to the relay exactly once. The cooldown is only recorded after
//! the relay accepts the enquiry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::contact::SanitizedContact;
use crate::domain::ports::{
    ContactMetrics, ContactRelay, ContactSubmission, ContactSubmissionAccepted,
    ContactSubmissionError, ContactSubmissionRequest, KeyValueStore, NoOpContactMetrics,
    RelaySubmission, SUCCESS_NOTICE, SubmissionOutcome,
};
use crate::domain::rate_limit::SubmissionRateLimiter;

/// Placeholder for optional fields left blank.
pub const NOT_PROVIDED: &str = "Not provided";

/// Fixed identity attached to every relayed enquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmissionSettings {
    /// Sender label shown by the relay.
    pub from_name: String,
    /// Tag identifying the originating form.
    pub source: String,
    /// Address offered to visitors when delivery fails.
    pub fallback_email: String,
}

impl Default for ContactSubmissionSettings {
    fn default() -> Self {
        Self {
            from_name: "SGT Infrastructure Website".to_owned(),
            source: "Contact Form - sgtinfrastructure.com".to_owned(),
            fallback_email: "info@sgtinfrastructure.com".to_owned(),
        }
    }
}

/// Domain service implementing [`ContactSubmission`].
#[derive(Clone)]
pub struct ContactSubmissionService {
    relay: Arc<dyn ContactRelay>,
    rate_limiter: SubmissionRateLimiter,
    settings: ContactSubmissionSettings,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn ContactMetrics>,
}

impl ContactSubmissionService {
    /// Build the service with the standard cooldown window.
    pub fn new(
        relay: Arc<dyn ContactRelay>,
        settings: ContactSubmissionSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rate_limiter = SubmissionRateLimiter::new(clock.clone());
        Self::with_rate_limiter(relay, settings, clock, rate_limiter)
    }

    /// Build the service with an explicit rate limiter.
    pub fn with_rate_limiter(
        relay: Arc<dyn ContactRelay>,
        settings: ContactSubmissionSettings,
        clock: Arc<dyn Clock>,
        rate_limiter: SubmissionRateLimiter,
    ) -> Self {
        Self {
            relay,
            rate_limiter,
            settings,
            clock,
            metrics: Arc::new(NoOpContactMetrics),
        }
    }

    /// Replace the outcome recorder.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn ContactMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    fn relay_submission(
        &self,
        contact: SanitizedContact,
        submitted_at: DateTime<Utc>,
    ) -> RelaySubmission {
        let subject = format!("New Contact Form Submission from {}", contact.name);
        RelaySubmission {
            name: contact.name,
            email: contact.email,
            phone: contact.phone.unwrap_or_else(|| NOT_PROVIDED.to_owned()),
            company: contact.company.unwrap_or_else(|| NOT_PROVIDED.to_owned()),
            message: contact.message,
            subject,
            from_name: self.settings.from_name.clone(),
            submitted_at,
            source: self.settings.source.clone(),
        }
    }
}

/// ISO-8601 rendering used on the wire: millisecond precision, `Z` suffix.
pub fn format_submission_time(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn honeypot_tripped(request: &ContactSubmissionRequest) -> bool {
    request
        .honeypot
        .as_deref()
        .is_some_and(|value| !value.is_empty())
}

fn outcome_of(
    result: &Result<ContactSubmissionAccepted, ContactSubmissionError>,
) -> SubmissionOutcome {
    match result {
        Ok(_) => SubmissionOutcome::Accepted,
        Err(ContactSubmissionError::SuspectedBot) => SubmissionOutcome::SuspectedBot,
        Err(ContactSubmissionError::RateLimited(_)) => SubmissionOutcome::RateLimited,
        Err(ContactSubmissionError::Invalid(_)) => SubmissionOutcome::Invalid,
        Err(ContactSubmissionError::Delivery { .. }) => SubmissionOutcome::DeliveryFailed,
    }
}

impl ContactSubmissionService {
    async fn process(
        &self,
        store: &dyn KeyValueStore,
        request: ContactSubmissionRequest,
    ) -> Result<ContactSubmissionAccepted, ContactSubmissionError> {
        if honeypot_tripped(&request) {
            warn!("contact submission rejected: honeypot field filled");
            return Err(ContactSubmissionError::SuspectedBot);
        }

        self.rate_limiter.check(store)?;

        let validation = request.form.validate();
        if !validation.is_valid() {
            info!(
                failing_fields = validation.errors().len(),
                "contact submission failed validation"
            );
            return Err(ContactSubmissionError::Invalid(validation));
        }

        let submitted_at = self.clock.utc();
        let submission = self.relay_submission(request.form.sanitized(), submitted_at);

        if let Err(source) = self.relay.deliver(&submission).await {
            error!(error = %source, "contact relay delivery failed");
            return Err(ContactSubmissionError::Delivery {
                source,
                fallback_email: self.settings.fallback_email.clone(),
            });
        }

        if let Err(persist_error) = self.rate_limiter.record(store) {
            warn!(error = %persist_error, "failed to record contact cooldown");
        }
        info!(
            submitted_at = %format_submission_time(submitted_at),
            "contact submission relayed"
        );

        Ok(ContactSubmissionAccepted {
            notice: SUCCESS_NOTICE.to_owned(),
            submitted_at,
        })
    }
}

#[async_trait(?Send)]
impl ContactSubmission for ContactSubmissionService {
    async fn submit(
        &self,
        store: &dyn KeyValueStore,
        request: ContactSubmissionRequest,
    ) -> Result<ContactSubmissionAccepted, ContactSubmissionError> {
        let result = self.process(store, request).await;
        let outcome = outcome_of(&result);
        if let Err(metrics_error) = self.metrics.record_outcome(outcome).await {
            warn!(
                error = %metrics_error,
                outcome = outcome.as_label(),
                "failed to record contact metrics"
            );
        }
        result
    }
}
