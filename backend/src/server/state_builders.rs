//! Builders for the contact relay, submission service and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use site_backend::domain::ContactSubmissionService;
use site_backend::domain::ports::{ContactRelay, UnconfiguredContactRelay};
use site_backend::inbound::http::state::HttpState;
use site_backend::outbound::relay::{ContactRelaySettings, HttpContactRelay};

use super::ServerConfig;

/// Build the relay adapter from settings.
///
/// Without an access key the site still starts, but every submission fails
/// with the fallback notice.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the endpoint or timeout is invalid, or
/// the HTTP client cannot be built.
fn build_contact_relay(settings: &ContactRelaySettings) -> std::io::Result<Arc<dyn ContactRelay>> {
    let endpoint = settings.endpoint().map_err(std::io::Error::other)?;
    let timeout = settings.timeout().map_err(std::io::Error::other)?;

    let Some(access_key) = settings.access_key() else {
        warn!("CONTACT_RELAY_ACCESS_KEY is not set; contact submissions will fail");
        return Ok(Arc::new(UnconfiguredContactRelay));
    };

    info!(%endpoint, timeout_secs = timeout.as_secs(), "contact relay configured");
    let relay = HttpContactRelay::new(endpoint, access_key, timeout)
        .map_err(|err| std::io::Error::other(format!("contact relay client: {err}")))?;
    Ok(Arc::new(relay))
}

/// Build the contact submission service, recording outcomes in Prometheus
/// when a registry is available.
#[cfg(feature = "metrics")]
fn build_contact_service(config: &ServerConfig) -> std::io::Result<ContactSubmissionService> {
    use site_backend::outbound::metrics::PrometheusContactMetrics;

    let service = ContactSubmissionService::new(
        build_contact_relay(&config.relay)?,
        config.relay.submission_settings(),
        Arc::new(DefaultClock),
    );
    let Some(prometheus) = &config.prometheus else {
        return Ok(service);
    };
    let metrics = PrometheusContactMetrics::new(&prometheus.registry).map_err(|err| {
        std::io::Error::other(format!("contact metrics registration failed: {err}"))
    })?;
    Ok(service.with_metrics(Arc::new(metrics)))
}

/// Build the contact submission service.
#[cfg(not(feature = "metrics"))]
fn build_contact_service(config: &ServerConfig) -> std::io::Result<ContactSubmissionService> {
    Ok(ContactSubmissionService::new(
        build_contact_relay(&config.relay)?,
        config.relay.submission_settings(),
        Arc::new(DefaultClock),
    ))
}

/// Build the shared HTTP state.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let contact = build_contact_service(config)?;
    Ok(web::Data::new(HttpState::new(Arc::new(contact))))
}
