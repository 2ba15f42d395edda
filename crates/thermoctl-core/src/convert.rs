// ── API-to-domain type conversions ──
//
// Bridges raw `thermoctl_api` wire records into canonical domain types,
// plus the keyed-map assembly every cached entity set goes through.

use thermoctl_api::{ModeRecord, ScheduleRecord, StatusRecord, ZoneRecord};

use crate::model::{
    EntityMap, Equipment, Mode, ModeId, Priority, Schedule, ScheduleId, Status, Zone, ZoneId,
};

impl From<ZoneRecord> for Zone {
    fn from(r: ZoneRecord) -> Self {
        Self {
            id: ZoneId(r.id),
            name: r.name,
        }
    }
}

impl From<ModeRecord> for Mode {
    fn from(r: ModeRecord) -> Self {
        Self {
            id: ModeId(r.id),
            zone_id: r.zone_id.map(ZoneId),
            name: r.name,
            min_temp: r.min_temp,
            max_temp: r.max_temp,
            correction: r.correction,
        }
    }
}

impl From<ScheduleRecord> for Schedule {
    fn from(r: ScheduleRecord) -> Self {
        Self {
            id: ScheduleId(r.id),
            zone_id: r.zone_id.map(ZoneId),
            mode_id: ModeId(r.mode_id),
            priority: Priority(r.priority),
            day_of_week: r.day_of_week,
            start_time: r.start_time,
            end_time: r.end_time,
            start_day: r.start_day,
            end_day: r.end_day,
        }
    }
}

impl From<StatusRecord> for Status {
    fn from(r: StatusRecord) -> Self {
        Self {
            temperature: r.temperature,
            humidity: r.humidity,
            heat_index: r.heat_index,
            min_temp: r.min,
            max_temp: r.max,
            correction: r.correction,
            active_mode: r.mode_id.map(ModeId),
            active_schedule: r.schedule_id.map(ScheduleId),
            equipment: Equipment {
                heat: r.heat,
                cooling: r.ac,
                fan: r.fan,
            },
        }
    }
}

/// Types that know their own server-assigned id.
pub(crate) trait Keyed {
    type Id: Copy + Eq + std::hash::Hash;
    fn key(&self) -> Self::Id;
}

impl Keyed for Zone {
    type Id = ZoneId;
    fn key(&self) -> ZoneId {
        self.id
    }
}

impl Keyed for Mode {
    type Id = ModeId;
    fn key(&self) -> ModeId {
        self.id
    }
}

impl Keyed for Schedule {
    type Id = ScheduleId;
    fn key(&self) -> ScheduleId {
        self.id
    }
}

/// Convert a wire array into an id-keyed map. A duplicated id keeps the
/// last record, matching how the server's list would overwrite.
pub(crate) fn keyed<R, T>(records: Vec<R>) -> EntityMap<T::Id, T>
where
    T: From<R> + Keyed,
{
    records
        .into_iter()
        .map(T::from)
        .map(|t| (t.key(), t))
        .collect()
}
