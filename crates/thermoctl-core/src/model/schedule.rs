// ── Schedule domain type ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::{ModeId, ScheduleId, ZoneId};

/// Tie-breaker between overlapping schedules.
///
/// The client only carries the value end to end; the server decides what
/// wins. The named levels are the ones the server defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i64);

impl Priority {
    pub const DEFAULT: Self = Self(1);
    pub const SCHEDULED: Self = Self(2);
    pub const OVERRIDE: Self = Self(3);
    pub const CUSTOM: Self = Self(4);

    /// Human label for the named levels, `None` for anything else.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::DEFAULT => Some("default"),
            Self::SCHEDULED => Some("scheduled"),
            Self::OVERRIDE => Some("override"),
            Self::CUSTOM => Some("custom"),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({label})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// A weekly recurring window, bounded by a validity date range, that
/// activates a mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub zone_id: Option<ZoneId>,
    pub mode_id: ModeId,
    pub priority: Priority,
    /// Bit *i* set = active on weekday *i*, Sunday = bit 0.
    pub day_of_week: u8,
    /// Seconds since local midnight, 0..=86399.
    pub start_time: u32,
    /// Seconds since local midnight, 0..=86399.
    pub end_time: u32,
    pub start_day: DateTime<Utc>,
    pub end_day: DateTime<Utc>,
}
