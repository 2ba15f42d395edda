// Thermostat API HTTP client
//
// Wraps `reqwest::Client` with `/v1` URL construction and status-code
// handling. Endpoint families (zones, modes, schedules, status, pages)
// are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the thermostat API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// fetches can be moved onto spawned tasks.
#[derive(Debug, Clone)]
pub struct ThermostatClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ThermostatClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the thermostat root (e.g. `https://thermostat.local:8443`);
    /// every endpoint lives below `/v1`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The thermostat base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/v1/{path}`.
    pub(crate) fn v1_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/v1/{path}"))?)
    }

    /// Build a zone-scoped URL: `{base}/v1/{path}?zoneID={zone}`.
    pub(crate) fn zone_url(&self, path: &str, zone: i64) -> Result<Url, Error> {
        let mut url = self.v1_url(path)?;
        url.query_pairs_mut()
            .append_pair("zoneID", &zone.to_string());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Send a GET request and return the body as text.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;

        Ok(resp.text().await?)
    }

    /// Send a POST request with a JSON body.
    ///
    /// The success body carries nothing callers rely on, so it is returned
    /// as raw text.
    pub(crate) async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self.http.post(url).json(body).send().await?;
        let resp = check_status(resp).await?;

        let text = resp.text().await?;
        trace!(len = text.len(), "POST response body");
        Ok(text)
    }
}

/// Turn any non-2xx response into `Error::Rejected` with the plain-text body.
async fn check_status(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ThermostatClient {
        ThermostatClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn v1_url_ignores_trailing_slash() {
        let a = client("https://thermostat.local:8443/");
        let b = client("https://thermostat.local:8443");
        assert_eq!(
            a.v1_url("zones").unwrap().as_str(),
            "https://thermostat.local:8443/v1/zones"
        );
        assert_eq!(a.v1_url("zones").unwrap(), b.v1_url("/zones").unwrap());
    }

    #[test]
    fn zone_url_appends_query() {
        let c = client("http://127.0.0.1:9000");
        assert_eq!(
            c.zone_url("mode", 7).unwrap().as_str(),
            "http://127.0.0.1:9000/v1/mode?zoneID=7"
        );
    }
}
