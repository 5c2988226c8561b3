//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_metrics;
mod contact_relay;
mod contact_submission;
mod key_value_store;

#[cfg(test)]
pub use contact_metrics::MockContactMetrics;
pub use contact_metrics::{
    ContactMetrics, ContactMetricsError, NoOpContactMetrics, SubmissionOutcome,
};
#[cfg(test)]
pub use contact_relay::MockContactRelay;
pub use contact_relay::{
    ContactRelay, ContactRelayError, FixtureContactRelay, RelayReceipt, RelaySubmission,
    UnconfiguredContactRelay,
};
pub use contact_submission::{
    ContactSubmission, ContactSubmissionAccepted, ContactSubmissionError,
    ContactSubmissionRequest, SUCCESS_NOTICE,
};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore, KeyValueStoreError};
