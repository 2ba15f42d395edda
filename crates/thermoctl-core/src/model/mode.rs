// ── Mode domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::{ModeId, ZoneId};

/// A named temperature band with a calibration correction, scoped to a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    pub zone_id: Option<ZoneId>,
    pub name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub correction: f64,
}
