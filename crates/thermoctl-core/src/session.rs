// ── Session state ──
//
// The current zone selection, scoped to one application instance. Held in
// a watch channel so front ends can observe switches.

use tokio::sync::watch;

use crate::error::CoreError;
use crate::model::ZoneId;

/// Which zone's modes, schedules and status are in play.
#[derive(Debug)]
pub struct Session {
    zone: watch::Sender<Option<ZoneId>>,
}

impl Session {
    pub fn new() -> Self {
        let (zone, _) = watch::channel(None);
        Self { zone }
    }

    /// The selected zone, if any.
    pub fn zone(&self) -> Option<ZoneId> {
        *self.zone.borrow()
    }

    /// The selected zone, or [`CoreError::NoZoneSelected`].
    pub fn require_zone(&self) -> Result<ZoneId, CoreError> {
        self.zone().ok_or(CoreError::NoZoneSelected)
    }

    /// Make `zone` current. Returns the previous selection.
    pub(crate) fn select(&self, zone: ZoneId) -> Option<ZoneId> {
        self.zone.send_replace(Some(zone))
    }

    /// Watch for zone switches.
    pub fn subscribe(&self) -> watch::Receiver<Option<ZoneId>> {
        self.zone.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
