// Schedule endpoints
//
// The server has no edit endpoint; callers replace a schedule by adding
// the new one and deleting the old.

use tracing::debug;

use crate::client::ThermostatClient;
use crate::error::Error;
use crate::models::{AddScheduleRequest, DeleteScheduleRequest, ScheduleRecord};

impl ThermostatClient {
    /// List the schedules defined for a zone.
    ///
    /// `GET /v1/schedule?zoneID={zone}`
    pub async fn list_schedules(&self, zone: i64) -> Result<Vec<ScheduleRecord>, Error> {
        let url = self.zone_url("schedule", zone)?;
        debug!(zone, "listing schedules");
        self.get_json(url).await
    }

    /// Create a schedule.
    ///
    /// `POST /v1/schedule/add`
    pub async fn add_schedule(&self, req: &AddScheduleRequest) -> Result<(), Error> {
        let url = self.v1_url("schedule/add")?;
        debug!(
            zone = req.zone_id,
            mode = req.mode_id,
            days = req.day_of_week,
            "adding schedule"
        );
        self.post_json(url, req).await?;
        Ok(())
    }

    /// Delete a schedule.
    ///
    /// `POST /v1/schedule/delete`
    pub async fn delete_schedule(&self, req: &DeleteScheduleRequest) -> Result<(), Error> {
        let url = self.v1_url("schedule/delete")?;
        debug!(zone = req.zone_id, id = req.id, "deleting schedule");
        self.post_json(url, req).await?;
        Ok(())
    }
}
