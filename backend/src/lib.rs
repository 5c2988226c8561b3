//! Site backend library modules.
//!
//! Hexagonal layout: [`domain`] holds the contact form rules and ports,
//! [`inbound`] adapts HTTP requests onto them and [`outbound`] delivers
//! enquiries to the form relay.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
