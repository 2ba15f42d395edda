// ── Runtime connection configuration ──
//
// Describes *how* to reach a thermostat. Front ends construct a
// `ClientConfig` and hand it in; core never reads config files.

use std::time::Duration;

use url::Url;

use thermoctl_api::transport::{TlsMode, TransportConfig};
use thermoctl_api::ThermostatClient;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed thermostat certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single thermostat.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Thermostat root URL (e.g., `https://thermostat.local:8443`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the API client this configuration describes.
    pub fn build_client(&self) -> Result<ThermostatClient, CoreError> {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        let transport = TransportConfig {
            tls,
            timeout: self.timeout,
        };
        Ok(ThermostatClient::new(self.url.clone(), &transport)?)
    }
}
