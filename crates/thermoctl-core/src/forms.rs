// ── Form submitters ──
//
// Raw form fields in, API requests out. Every field stays a string until
// submission so a rejected form can be shown again exactly as entered.
// A submitter either mutates the server, invalidates the affected cache
// entry and navigates to the listing, or shows the error inline and
// touches nothing.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use thermoctl_api::{AddModeRequest, AddScheduleRequest, DeleteScheduleRequest, EditModeRequest};

use crate::app::Thermostat;
use crate::cache::EntityKind;
use crate::codec;
use crate::error::CoreError;
use crate::model::{Mode, Priority, Schedule, ScheduleId, ZoneId};
use crate::router::{Navigation, Route};
use crate::surface::Surface;

// ── Mode form ────────────────────────────────────────────────────────

/// Fields of the add/edit mode form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeForm {
    /// Present when editing.
    pub id: Option<String>,
    pub name: String,
    pub min_temp: String,
    pub max_temp: String,
    /// Calibration correction.
    pub offset: String,
}

impl From<&Mode> for ModeForm {
    fn from(mode: &Mode) -> Self {
        Self {
            id: Some(mode.id.to_string()),
            name: mode.name.clone(),
            min_temp: mode.min_temp.to_string(),
            max_temp: mode.max_temp.to_string(),
            offset: mode.correction.to_string(),
        }
    }
}

impl ModeForm {
    pub fn to_add_request(&self, zone: ZoneId) -> Result<AddModeRequest, CoreError> {
        Ok(AddModeRequest {
            zone_id: zone.get(),
            name: parse_name(&self.name)?,
            min_temp: parse_temp("minTemp", &self.min_temp)?,
            max_temp: parse_temp("maxTemp", &self.max_temp)?,
            correction: parse_temp("offset", &self.offset)?,
        })
    }

    pub fn to_edit_request(&self, zone: ZoneId) -> Result<EditModeRequest, CoreError> {
        let id = self
            .id
            .as_deref()
            .ok_or_else(|| CoreError::invalid("ID", "missing"))?;
        Ok(EditModeRequest {
            id: parse_int("ID", id)?,
            zone_id: zone.get(),
            name: parse_name(&self.name)?,
            min_temp: parse_temp("minTemp", &self.min_temp)?,
            max_temp: parse_temp("maxTemp", &self.max_temp)?,
            correction: parse_temp("offset", &self.offset)?,
        })
    }
}

// ── Schedule form ────────────────────────────────────────────────────

/// Fields of the add/edit schedule form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    /// Present when editing.
    pub id: Option<String>,
    pub mode_id: String,
    /// Blank means [`Priority::DEFAULT`].
    pub priority: String,
    /// Sunday first.
    pub weekdays: [bool; 7],
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
    /// Local `YYYY-MM-DDTHH:MM`
    pub start_date: String,
    pub end_date: String,
}

impl ScheduleForm {
    /// An empty form whose validity window starts and ends on `today`.
    pub fn starting(today: NaiveDate) -> Self {
        let midnight = format!("{}T00:00", today.format("%Y-%m-%d"));
        Self {
            id: None,
            mode_id: String::new(),
            priority: Priority::SCHEDULED.0.to_string(),
            weekdays: [false; 7],
            start_time: String::new(),
            end_time: String::new(),
            start_date: midnight.clone(),
            end_date: midnight,
        }
    }

    /// A form prefilled from an existing schedule, dates in local time.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self::from_schedule_in(schedule, &Local)
    }

    pub fn from_schedule_in<Tz>(schedule: &Schedule, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let glyphs = codec::mask_to_weekday_glyphs(schedule.day_of_week);
        Self {
            id: Some(schedule.id.to_string()),
            mode_id: schedule.mode_id.to_string(),
            priority: schedule.priority.0.to_string(),
            weekdays: codec::glyph_flags(&glyphs),
            start_time: codec::seconds_to_clock(schedule.start_time),
            end_time: codec::seconds_to_clock(schedule.end_time),
            start_date: codec::date_to_input_value_in(schedule.start_day, tz),
            end_date: codec::date_to_input_value_in(schedule.end_day, tz),
        }
    }

    /// Encode with dates read as local wall-clock time.
    pub fn to_add_request(&self, zone: ZoneId) -> Result<AddScheduleRequest, CoreError> {
        self.to_add_request_in(zone, &Local)
    }

    pub fn to_add_request_in<Tz: TimeZone>(
        &self,
        zone: ZoneId,
        tz: &Tz,
    ) -> Result<AddScheduleRequest, CoreError> {
        let mode_id = self.mode_id.trim();
        if mode_id.is_empty() {
            return Err(CoreError::invalid("modeID", "select a mode"));
        }
        let priority = match self.priority.trim() {
            "" => Priority::DEFAULT.0,
            raw => parse_int("priority", raw)?,
        };

        Ok(AddScheduleRequest {
            zone_id: zone.get(),
            mode_id: parse_int("modeID", mode_id)?,
            priority,
            day_of_week: codec::weekday_flags_to_mask(&self.weekdays),
            start_time: codec::clock_to_seconds(&self.start_time)
                .map_err(|e| CoreError::invalid("startTime", e))?,
            end_time: codec::clock_to_seconds(&self.end_time)
                .map_err(|e| CoreError::invalid("endTime", e))?,
            start_day: codec::input_value_to_date_in(&self.start_date, tz)
                .map_err(|e| CoreError::invalid("startDate", e))?,
            end_day: codec::input_value_to_date_in(&self.end_date, tz)
                .map_err(|e| CoreError::invalid("endDate", e))?,
        })
    }

    /// The schedule this form replaces when editing.
    pub fn replaced_id(&self) -> Result<ScheduleId, CoreError> {
        let id = self
            .id
            .as_deref()
            .ok_or_else(|| CoreError::invalid("ID", "missing"))?;
        parse_int("ID", id).map(ScheduleId)
    }
}

// ── Field parsing ────────────────────────────────────────────────────

fn parse_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::invalid("name", "must not be empty"));
    }
    Ok(name.to_owned())
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::invalid(field, format!("expected a whole number, got {raw:?}")))
}

fn parse_temp(field: &'static str, raw: &str) -> Result<f64, CoreError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::invalid(field, format!("expected a number, got {raw:?}"))),
    }
}

// ── Submitters ───────────────────────────────────────────────────────

impl<S: Surface> Thermostat<S> {
    /// Create a mode in the selected zone, then show the modes listing.
    pub async fn submit_add_mode(&self, form: &ModeForm) -> Result<Navigation, CoreError> {
        let outcome = self.send_add_mode(form).await;
        self.finish_submit(outcome, EntityKind::Modes, Route::Modes)
            .await
    }

    /// Update an existing mode, then show the modes listing.
    pub async fn submit_edit_mode(&self, form: &ModeForm) -> Result<Navigation, CoreError> {
        let outcome = self.send_edit_mode(form).await;
        self.finish_submit(outcome, EntityKind::Modes, Route::Modes)
            .await
    }

    /// Create a schedule in the selected zone, then show the schedules listing.
    pub async fn submit_add_schedule(&self, form: &ScheduleForm) -> Result<Navigation, CoreError> {
        let outcome = self.send_add_schedule(form).await;
        self.finish_submit(outcome, EntityKind::Schedules, Route::Schedules)
            .await
    }

    /// Replace a schedule. The API has no edit endpoint, so the new
    /// schedule is added first and the old one deleted after; a failed
    /// delete leaves both on the server and is reported like any other
    /// submission error.
    pub async fn submit_edit_schedule(
        &self,
        form: &ScheduleForm,
    ) -> Result<Navigation, CoreError> {
        let replaced = match form.replaced_id() {
            Ok(id) => id,
            Err(err) => return self.reject(err).await,
        };
        let zone = match self.send_add_schedule(form).await {
            Ok(zone) => zone,
            Err(err) => return self.reject(err).await,
        };
        // The add already changed the server's set.
        self.cache().invalidate(EntityKind::Schedules, zone);

        let outcome = self.send_delete_schedule(replaced).await;
        self.finish_submit(outcome, EntityKind::Schedules, Route::Schedules)
            .await
    }

    /// Delete a schedule, then show the schedules listing.
    pub async fn submit_delete_schedule(&self, id: ScheduleId) -> Result<Navigation, CoreError> {
        let outcome = self.send_delete_schedule(id).await;
        self.finish_submit(outcome, EntityKind::Schedules, Route::Schedules)
            .await
    }

    // ── Private helpers ──────────────────────────────────────────────

    async fn send_add_mode(&self, form: &ModeForm) -> Result<ZoneId, CoreError> {
        let zone = self.session().require_zone()?;
        let req = form.to_add_request(zone)?;
        self.client().add_mode(&req).await?;
        info!(%zone, name = %req.name, "mode added");
        Ok(zone)
    }

    async fn send_edit_mode(&self, form: &ModeForm) -> Result<ZoneId, CoreError> {
        let zone = self.session().require_zone()?;
        let req = form.to_edit_request(zone)?;
        self.client().edit_mode(&req).await?;
        info!(%zone, id = req.id, "mode updated");
        Ok(zone)
    }

    async fn send_add_schedule(&self, form: &ScheduleForm) -> Result<ZoneId, CoreError> {
        let zone = self.session().require_zone()?;
        let req = form.to_add_request(zone)?;
        self.client().add_schedule(&req).await?;
        info!(%zone, mode = req.mode_id, days = req.day_of_week, "schedule added");
        Ok(zone)
    }

    async fn send_delete_schedule(&self, id: ScheduleId) -> Result<ZoneId, CoreError> {
        let zone = self.session().require_zone()?;
        let req = DeleteScheduleRequest {
            zone_id: zone.get(),
            id: id.get(),
        };
        self.client().delete_schedule(&req).await?;
        info!(%zone, %id, "schedule deleted");
        Ok(zone)
    }

    async fn finish_submit(
        &self,
        outcome: Result<ZoneId, CoreError>,
        kind: EntityKind,
        listing: Route,
    ) -> Result<Navigation, CoreError> {
        match outcome {
            Ok(zone) => {
                self.cache().invalidate(kind, zone);
                Ok(self.navigate(listing).await)
            }
            Err(err) => self.reject(err).await,
        }
    }

    async fn reject(&self, err: CoreError) -> Result<Navigation, CoreError> {
        warn!(error = %err, "form submission failed");
        self.surface().await.show_error(&err.to_string());
        Err(err)
    }
}
