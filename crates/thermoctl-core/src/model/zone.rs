// ── Zone and live status ──

use serde::{Deserialize, Serialize};

use super::entity_id::{ModeId, ScheduleId, ZoneId};

/// One physical thermostat location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}

/// Live reading for the selected zone. Never cached beyond one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub heat_index: Option<f64>,
    /// Band currently in force, if the server reports it.
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub correction: Option<f64>,
    pub active_mode: Option<ModeId>,
    pub active_schedule: Option<ScheduleId>,
    pub equipment: Equipment,
}

/// Which outputs the controller is driving. `None` when not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub heat: Option<bool>,
    pub cooling: Option<bool>,
    pub fan: Option<bool>,
}
