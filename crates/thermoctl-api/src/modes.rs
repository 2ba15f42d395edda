// Mode endpoints
//
// Modes are zone-scoped on read. Writes carry the zone in the body.

use tracing::debug;

use crate::client::ThermostatClient;
use crate::error::Error;
use crate::models::{AddModeRequest, EditModeRequest, ModeRecord};

impl ThermostatClient {
    /// List the modes defined for a zone.
    ///
    /// `GET /v1/mode?zoneID={zone}`
    pub async fn list_modes(&self, zone: i64) -> Result<Vec<ModeRecord>, Error> {
        let url = self.zone_url("mode", zone)?;
        debug!(zone, "listing modes");
        self.get_json(url).await
    }

    /// Create a mode.
    ///
    /// `POST /v1/mode/add`
    pub async fn add_mode(&self, req: &AddModeRequest) -> Result<(), Error> {
        let url = self.v1_url("mode/add")?;
        debug!(zone = req.zone_id, name = %req.name, "adding mode");
        self.post_json(url, req).await?;
        Ok(())
    }

    /// Replace an existing mode's name, band and correction.
    ///
    /// `POST /v1/mode/edit`
    pub async fn edit_mode(&self, req: &EditModeRequest) -> Result<(), Error> {
        let url = self.v1_url("mode/edit")?;
        debug!(zone = req.zone_id, id = req.id, "editing mode");
        self.post_json(url, req).await?;
        Ok(())
    }
}
