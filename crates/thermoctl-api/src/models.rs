// Thermostat API wire types
//
// Response records mirror the server's JSON field names exactly (a mix of
// `ID` and camelCase). Request bodies use the PascalCase keys the POST
// handlers decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Responses ────────────────────────────────────────────────────────

/// One thermostat location from `GET /v1/zones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
}

/// A temperature band from `GET /v1/mode?zoneID=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "zoneID", default)]
    pub zone_id: Option<i64>,
    pub name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub correction: f64,
}

/// A weekly window from `GET /v1/schedule?zoneID=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "zoneID", default)]
    pub zone_id: Option<i64>,
    #[serde(rename = "modeID")]
    pub mode_id: i64,
    pub priority: i64,
    pub day_of_week: u8,
    pub start_day: DateTime<Utc>,
    pub end_day: DateTime<Utc>,
    /// Seconds since local midnight.
    pub start_time: u32,
    /// Seconds since local midnight.
    pub end_time: u32,
}

/// Live reading from `GET /v1/status?zoneID=N`.
///
/// Only `Temperature` is guaranteed; the rest is reported by newer
/// servers and absent on older ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusRecord {
    pub temperature: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub heat_index: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub correction: Option<f64>,
    #[serde(rename = "ModeID", default)]
    pub mode_id: Option<i64>,
    #[serde(rename = "ScheduleID", default)]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub heat: Option<bool>,
    #[serde(rename = "AC", default)]
    pub ac: Option<bool>,
    #[serde(default)]
    pub fan: Option<bool>,
}

// ── Requests ─────────────────────────────────────────────────────────

/// Body for `POST /v1/mode/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddModeRequest {
    #[serde(rename = "ZoneID")]
    pub zone_id: i64,
    pub name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub correction: f64,
}

/// Body for `POST /v1/mode/edit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditModeRequest {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "ZoneID")]
    pub zone_id: i64,
    pub name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub correction: f64,
}

/// Body for `POST /v1/schedule/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddScheduleRequest {
    #[serde(rename = "ZoneID")]
    pub zone_id: i64,
    #[serde(rename = "ModeID")]
    pub mode_id: i64,
    pub priority: i64,
    pub day_of_week: u8,
    pub start_time: u32,
    pub end_time: u32,
    pub start_day: DateTime<Utc>,
    pub end_day: DateTime<Utc>,
}

/// Body for `POST /v1/schedule/delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteScheduleRequest {
    #[serde(rename = "ZoneID")]
    pub zone_id: i64,
    #[serde(rename = "ID")]
    pub id: i64,
}
