//! Backend entry-point: loads configuration and serves the site API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use site_backend::inbound::http::health::HealthState;
use site_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use site_backend::outbound::relay::ContactRelaySettings;

const BIND_ADDR_ENV: &str = "SITE_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

fn bind_addr_from_env() -> std::io::Result<SocketAddr> {
    let raw = env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
    raw.parse().map_err(|err| {
        std::io::Error::other(format!("invalid {BIND_ADDR_ENV}='{raw}': {err}"))
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let relay = ContactRelaySettings::load_from_iter(env::args_os())
        .map_err(|err| std::io::Error::other(format!("contact relay settings: {err}")))?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr_from_env()?,
        relay,
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
