//! Contact relay configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::ContactSubmissionSettings;

/// Relay endpoint used when none is configured.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Problems with otherwise loadable relay settings.
#[derive(Debug, thiserror::Error)]
pub enum RelaySettingsError {
    /// The endpoint is not an absolute URL.
    #[error("invalid contact relay endpoint {value:?}: {source}")]
    InvalidEndpoint {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A zero timeout would fail every request.
    #[error("contact relay timeout must be at least one second")]
    ZeroTimeout,
}

/// Relay credentials, endpoint and message identity.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACT_RELAY")]
pub struct ContactRelaySettings {
    /// Relay access key. Without one, submissions fail with the fallback
    /// notice.
    pub access_key: Option<String>,
    /// Override for the relay endpoint.
    pub endpoint: Option<String>,
    /// Sender label shown in relayed emails.
    pub from_name: Option<String>,
    /// Source tag attached to relayed emails.
    pub source: Option<String>,
    /// Address offered to visitors when delivery fails.
    pub fallback_email: Option<String>,
    /// Outbound request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
}

impl ContactRelaySettings {
    /// Configured access key, ignoring blank values.
    pub fn access_key(&self) -> Option<&str> {
        self.access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Relay endpoint, falling back to [`DEFAULT_RELAY_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns [`RelaySettingsError::InvalidEndpoint`] for unparsable URLs.
    pub fn endpoint(&self) -> Result<Url, RelaySettingsError> {
        let value = self.endpoint.as_deref().unwrap_or(DEFAULT_RELAY_ENDPOINT);
        Url::parse(value).map_err(|source| RelaySettingsError::InvalidEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    /// Outbound request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RelaySettingsError::ZeroTimeout`] when set to zero.
    pub fn timeout(&self) -> Result<Duration, RelaySettingsError> {
        if self.timeout_secs == 0 {
            return Err(RelaySettingsError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.timeout_secs))
    }

    /// Identity the domain attaches to each enquiry, with defaults for any
    /// unset value.
    pub fn submission_settings(&self) -> ContactSubmissionSettings {
        let defaults = ContactSubmissionSettings::default();
        ContactSubmissionSettings {
            from_name: self.from_name.clone().unwrap_or(defaults.from_name),
            source: self.source.clone().unwrap_or(defaults.source),
            fallback_email: self.fallback_email.clone().unwrap_or(defaults.fallback_email),
        }
    }
}
