// Zone endpoints

use tracing::debug;

use crate::client::ThermostatClient;
use crate::error::Error;
use crate::models::ZoneRecord;

impl ThermostatClient {
    /// List every zone the thermostat controls.
    ///
    /// `GET /v1/zones`
    pub async fn list_zones(&self) -> Result<Vec<ZoneRecord>, Error> {
        let url = self.v1_url("zones")?;
        debug!("listing zones");
        self.get_json(url).await
    }
}
