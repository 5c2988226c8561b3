//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ContactSubmission;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Contact form use case.
    pub contact: Arc<dyn ContactSubmission>,
}

impl HttpState {
    /// Construct state from the contact use case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use site_backend::domain::ports::FixtureContactRelay;
    /// use site_backend::domain::{ContactSubmissionService, ContactSubmissionSettings};
    /// use site_backend::inbound::http::state::HttpState;
    ///
    /// let service = ContactSubmissionService::new(
    ///     Arc::new(FixtureContactRelay),
    ///     ContactSubmissionSettings::default(),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _contact = state.contact.clone();
    /// ```
    pub fn new(contact: Arc<dyn ContactSubmission>) -> Self {
        Self { contact }
    }
}
