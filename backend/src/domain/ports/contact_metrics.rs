//! Port for counting contact submission outcomes.
//!
//! Lets operators watch spam, throttling and relay failures without the
//! domain knowing which metrics backend is in use.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording contact metrics.
    pub enum ContactMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "contact metrics exporter failed: {message}",
    }
}

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionOutcome {
    /// Relayed and recorded.
    Accepted,
    /// Honeypot field was filled.
    SuspectedBot,
    /// Cooldown still active.
    RateLimited,
    /// Validation failed.
    Invalid,
    /// Relay could not take the enquiry.
    DeliveryFailed,
}

impl SubmissionOutcome {
    /// Stable label value for exporters.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::SuspectedBot => "suspected_bot",
            Self::RateLimited => "rate_limited",
            Self::Invalid => "invalid",
            Self::DeliveryFailed => "delivery_failed",
        }
    }
}

/// Records submission outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMetrics: Send + Sync {
    /// Count one attempt ending in `outcome`.
    async fn record_outcome(&self, outcome: SubmissionOutcome) -> Result<(), ContactMetricsError>;
}

/// Discards every outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpContactMetrics;

#[async_trait]
impl ContactMetrics for NoOpContactMetrics {
    async fn record_outcome(&self, _outcome: SubmissionOutcome) -> Result<(), ContactMetricsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SubmissionOutcome::Accepted, "accepted")]
    #[case(SubmissionOutcome::SuspectedBot, "suspected_bot")]
    #[case(SubmissionOutcome::RateLimited, "rate_limited")]
    #[case(SubmissionOutcome::Invalid, "invalid")]
    #[case(SubmissionOutcome::DeliveryFailed, "delivery_failed")]
    fn labels_are_snake_case(#[case] outcome: SubmissionOutcome, #[case] label: &str) {
        assert_eq!(outcome.as_label(), label);
    }

    #[tokio::test]
    async fn noop_accepts_everything() {
        assert!(
            NoOpContactMetrics
                .record_outcome(SubmissionOutcome::DeliveryFailed)
                .await
                .is_ok()
        );
    }
}
