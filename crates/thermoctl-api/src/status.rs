// Live status endpoint

use tracing::debug;

use crate::client::ThermostatClient;
use crate::error::Error;
use crate::models::StatusRecord;

impl ThermostatClient {
    /// Read the current temperature (and whatever else the server reports)
    /// for a zone.
    ///
    /// `GET /v1/status?zoneID={zone}`
    pub async fn status(&self, zone: i64) -> Result<StatusRecord, Error> {
        let url = self.zone_url("status", zone)?;
        debug!(zone, "reading status");
        self.get_json(url).await
    }
}
