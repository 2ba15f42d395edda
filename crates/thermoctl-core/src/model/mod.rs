// ── Domain model ──
//
// Canonical types handed to hydration routines and view builders.
// Converted from the API crate's wire records in `convert`.

pub mod entity_id;
pub mod mode;
pub mod schedule;
pub mod zone;

use std::collections::HashMap;

pub use entity_id::{ModeId, ScheduleId, ZoneId};
pub use mode::Mode;
pub use schedule::{Priority, Schedule};
pub use zone::{Equipment, Status, Zone};

/// A fetched entity set keyed by server-assigned id. Order is not meaningful.
pub type EntityMap<I, T> = HashMap<I, T>;

pub type Zones = EntityMap<ZoneId, Zone>;
pub type Modes = EntityMap<ModeId, Mode>;
pub type Schedules = EntityMap<ScheduleId, Schedule>;
