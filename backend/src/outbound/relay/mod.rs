//! Contact relay outbound adapters.
//!
//! A thin reqwest implementation of the `ContactRelay` port plus the
//! settings that configure it.

mod config;
mod dto;
mod http_relay;

pub use config::{ContactRelaySettings, DEFAULT_RELAY_ENDPOINT, RelaySettingsError};
pub use http_relay::HttpContactRelay;
