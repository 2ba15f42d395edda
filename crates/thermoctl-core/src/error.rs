// ── Core error types ──
//
// User-facing errors from thermoctl-core. Remote failures collapse into an
// opaque message: the core decides *where* to show it, never *what kind*
// it was. `Clone` because a failed fetch is memoized and handed to every
// caller waiting on it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Remote ───────────────────────────────────────────────────────
    /// Transport failure or server rejection. `message` is the server's
    /// body text or the transport description.
    #[error("{message}")]
    Remote { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No zone selected")]
    NoZoneSelected,

    // ── Form errors ──────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<thermoctl_api::Error> for CoreError {
    fn from(err: thermoctl_api::Error) -> Self {
        match err {
            thermoctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            thermoctl_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            other => CoreError::Remote {
                message: other.message(),
            },
        }
    }
}
