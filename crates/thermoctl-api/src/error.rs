use thiserror::Error;

/// Top-level error type for the `thermoctl-api` crate.
///
/// The server reports every failure as a plain-text body, so callers that
/// only need something to show a user should reach for [`Error::message`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-2xx response. `body` is the server's plain-text explanation.
    #[error("Request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The opaque, user-facing message for this failure.
    ///
    /// Rejections yield the server's body verbatim (falling back to the
    /// status line when the body is empty); everything else yields its
    /// display form.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { status, body } => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_owned()
                }
            }
            other => other.to_string(),
        }
    }
}
