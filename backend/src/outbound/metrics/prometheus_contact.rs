//! Prometheus adapter for contact submission outcomes.
//!
//! Exposes `site_contact_submissions_total{outcome}` via the `/metrics`
//! endpoint. Label values come from [`SubmissionOutcome::as_label`].

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{ContactMetrics, ContactMetricsError, SubmissionOutcome};

const METRIC_NAME: &str = "site_contact_submissions_total";

/// Prometheus-backed recorder for contact submission outcomes.
pub struct PrometheusContactMetrics {
    submissions_total: IntCounterVec,
}

impl PrometheusContactMetrics {
    /// Create the counter and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error when a metric with the same name is already
    /// registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let submissions_total = IntCounterVec::new(
            Opts::new(METRIC_NAME, "Contact form submissions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions_total.clone()))?;
        Ok(Self { submissions_total })
    }
}

#[async_trait]
impl ContactMetrics for PrometheusContactMetrics {
    async fn record_outcome(&self, outcome: SubmissionOutcome) -> Result<(), ContactMetricsError> {
        self.submissions_total
            .get_metric_with_label_values(&[outcome.as_label()])
            .map_err(|err| ContactMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn make_metrics() -> (Registry, PrometheusContactMetrics) {
        let registry = Registry::new();
        let metrics =
            PrometheusContactMetrics::new(&registry).expect("metric registration should succeed");
        (registry, metrics)
    }

    #[test]
    fn registers_counter_with_registry() {
        let (registry, metrics) = make_metrics();
        metrics
            .submissions_total
            .with_label_values(&["accepted"])
            .inc();

        assert!(
            registry
                .gather()
                .iter()
                .any(|family| family.name() == METRIC_NAME),
            "{METRIC_NAME} should be registered"
        );
    }

    #[test]
    fn rejects_duplicate_registration() {
        let (registry, _metrics) = make_metrics();
        assert!(PrometheusContactMetrics::new(&registry).is_err());
    }

    #[rstest]
    #[case(SubmissionOutcome::Accepted)]
    #[case(SubmissionOutcome::RateLimited)]
    #[case(SubmissionOutcome::DeliveryFailed)]
    #[tokio::test]
    async fn counts_each_outcome_separately(#[case] outcome: SubmissionOutcome) {
        let (_registry, metrics) = make_metrics();

        metrics.record_outcome(outcome).await.expect("recorded");
        metrics.record_outcome(outcome).await.expect("recorded");

        let counter = metrics
            .submissions_total
            .with_label_values(&[outcome.as_label()]);
        assert_eq!(counter.get(), 2);
        let other = metrics.submissions_total.with_label_values(&["invalid"]);
        assert_eq!(other.get(), 0);
    }
}
