//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **relay**: reqwest-backed delivery of contact enquiries to the form
//!   relay service.
//! - **metrics**: Prometheus counters for submission outcomes (behind the
//!   `metrics` feature).
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

#[cfg(feature = "metrics")]
pub mod metrics;
pub mod relay;
