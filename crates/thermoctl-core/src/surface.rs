// ── Rendering surface ──
//
// The core never touches markup. A `Surface` receives page fragments and
// typed view models and decides how to draw them: a browser DOM, a
// terminal, or a recorder in tests.

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::codec::{self, DayGlyph};
use crate::forms::{ModeForm, ScheduleForm};
use crate::model::{Equipment, Mode, ModeId, Modes, Schedule, ScheduleId, Status, Zone, ZoneId};
use crate::router::Page;

/// Where navigation output lands.
///
/// Calls arrive in hydration order for the current page only; output from a
/// superseded navigation is never delivered.
pub trait Surface: Send {
    /// Install the application stylesheet. Called once at startup.
    fn inject_stylesheet(&mut self, css: &str);

    /// Swap in a freshly fetched page fragment, discarding the previous
    /// page's state.
    fn replace_fragment(&mut self, page: Page, markup: &str);

    /// Populate one section of the current page.
    fn render(&mut self, view: View);

    /// Show an error message in the page's inline error region.
    fn show_error(&mut self, message: &str);
}

/// One populated section of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    /// `main`: every zone.
    ZoneList(Vec<ZoneRow>),
    /// `zone`: the live reading.
    Status(StatusView),
    /// `zone`: the zone's modes as selectable options.
    ModeOptions(Vec<ModeOption>),
    /// `zone`: the zone's schedules.
    ZoneSchedules(Vec<ScheduleRow>),
    /// `modes`
    ModeList(Vec<ModeRow>),
    /// `addModes`, `editModes`
    ModeForm(ModeForm),
    /// `schedules`
    ScheduleList(Vec<ScheduleRow>),
    /// `addSchedule`, `editSchedule`
    ScheduleForm {
        form: ScheduleForm,
        modes: Vec<ModeOption>,
    },
}

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRow {
    pub id: ZoneId,
    pub name: String,
}

impl From<&Zone> for ZoneRow {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name.clone(),
        }
    }
}

/// Live reading with temperatures rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub heat_index: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub correction: Option<f64>,
    pub active_mode: Option<ModeId>,
    pub active_schedule: Option<ScheduleId>,
    pub equipment: Equipment,
}

impl From<&Status> for StatusView {
    fn from(status: &Status) -> Self {
        Self {
            temperature: codec::round_temp(status.temperature),
            humidity: status.humidity.map(codec::round_temp),
            heat_index: status.heat_index.map(codec::round_temp),
            min_temp: status.min_temp.map(codec::round_temp),
            max_temp: status.max_temp.map(codec::round_temp),
            correction: status.correction.map(codec::round_temp),
            active_mode: status.active_mode,
            active_schedule: status.active_schedule,
            equipment: status.equipment,
        }
    }
}

/// A mode as it appears in the modes listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeRow {
    pub id: ModeId,
    pub name: String,
    /// `60 to 70℉`
    pub range: String,
    /// `±0.5℉`
    pub correction: String,
}

impl From<&Mode> for ModeRow {
    fn from(mode: &Mode) -> Self {
        Self {
            id: mode.id,
            name: mode.name.clone(),
            range: format!(
                "{} to {}℉",
                codec::format_temp(mode.min_temp),
                codec::format_temp(mode.max_temp)
            ),
            correction: format!("±{}℉", codec::format_temp(mode.correction)),
        }
    }
}

/// A selectable mode. `id` is `None` for the leading blank option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeOption {
    pub id: Option<ModeId>,
    /// `Comfort (68, 72 ±0.5)`
    pub label: String,
}

impl ModeOption {
    pub fn blank() -> Self {
        Self {
            id: None,
            label: String::new(),
        }
    }
}

impl From<&Mode> for ModeOption {
    fn from(mode: &Mode) -> Self {
        Self {
            id: Some(mode.id),
            label: format!(
                "{} ({}, {} ±{})",
                mode.name, mode.min_temp, mode.max_temp, mode.correction
            ),
        }
    }
}

/// A schedule as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub id: ScheduleId,
    pub mode_id: ModeId,
    pub mode_name: String,
    pub priority: i64,
    pub weekdays: [DayGlyph; 7],
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
    /// `M/D/YYYY HH:MM`, local time
    pub start_day: String,
    pub end_day: String,
}

impl ScheduleRow {
    /// Build a row, resolving the mode name from `modes`. A mode that is
    /// not in the set shows as `mode #<id>`.
    pub fn new(schedule: &Schedule, modes: &Modes) -> Self {
        Self::new_in(schedule, modes, &Local)
    }

    pub fn new_in<Tz>(schedule: &Schedule, modes: &Modes, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mode_name = modes
            .get(&schedule.mode_id)
            .map_or_else(|| format!("mode #{}", schedule.mode_id), |m| m.name.clone());
        Self {
            id: schedule.id,
            mode_id: schedule.mode_id,
            mode_name,
            priority: schedule.priority.0,
            weekdays: codec::mask_to_weekday_glyphs(schedule.day_of_week),
            start_time: codec::seconds_to_clock(schedule.start_time),
            end_time: codec::seconds_to_clock(schedule.end_time),
            start_day: codec::display_date_in(schedule.start_day, tz),
            end_day: codec::display_date_in(schedule.end_day, tz),
        }
    }
}

// ── Row assembly ─────────────────────────────────────────────────────
//
// Entity sets are unordered maps; listings are sorted by id so output is
// stable between renders.

pub(crate) fn zone_rows(zones: &crate::model::Zones) -> Vec<ZoneRow> {
    let mut rows: Vec<ZoneRow> = zones.values().map(ZoneRow::from).collect();
    rows.sort_by_key(|r| r.id);
    rows
}

pub(crate) fn mode_rows(modes: &Modes) -> Vec<ModeRow> {
    let mut rows: Vec<ModeRow> = modes.values().map(ModeRow::from).collect();
    rows.sort_by_key(|r| r.id);
    rows
}

pub(crate) fn mode_options(modes: &Modes) -> Vec<ModeOption> {
    let mut sorted: Vec<&Mode> = modes.values().collect();
    sorted.sort_by_key(|m| m.id);
    sorted.into_iter().map(ModeOption::from).collect()
}

pub(crate) fn schedule_rows(schedules: &crate::model::Schedules, modes: &Modes) -> Vec<ScheduleRow> {
    let mut rows: Vec<ScheduleRow> = schedules
        .values()
        .map(|s| ScheduleRow::new(s, modes))
        .collect();
    rows.sort_by_key(|r| r.id);
    rows
}
