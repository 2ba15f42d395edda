// Page fragment and stylesheet endpoints
//
// These return markup and CSS as plain text; nothing here is JSON.

use tracing::debug;

use crate::client::ThermostatClient;
use crate::error::Error;

impl ThermostatClient {
    /// Fetch an HTML fragment by file name (e.g. `"modes.html"`).
    ///
    /// `GET /v1/{name}`
    pub async fn fragment(&self, name: &str) -> Result<String, Error> {
        let url = self.v1_url(name)?;
        debug!(name, "fetching fragment");
        self.get_text(url).await
    }

    /// Fetch the UI stylesheet.
    ///
    /// `GET /v1/thermostat.css`
    pub async fn stylesheet(&self) -> Result<String, Error> {
        self.fragment("thermostat.css").await
    }
}
