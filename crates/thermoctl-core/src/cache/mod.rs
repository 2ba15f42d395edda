// ── Entity cache ──
//
// Memoized, single-flight access to the remote entity sets. Zones live under
// one global key; modes, schedules and live status are keyed by zone so a
// zone switch can never hand back another zone's data.

mod slot;

use std::sync::Arc;

use strum::{Display, EnumIter};
use thermoctl_api::ThermostatClient;

use crate::convert::keyed;
use crate::error::CoreError;
use crate::model::{Modes, Schedules, Status, ZoneId, Zones};

use self::slot::{Reuse, Slots};
pub use self::slot::SlotState;

/// The entity kinds the cache memoizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Zones,
    Modes,
    Schedules,
    Status,
}

/// Memoized entity sets for one application instance.
///
/// Every getter returns the in-flight or completed fetch for its key when
/// one exists and otherwise starts exactly one remote fetch. Failures are
/// memoized like successes; [`invalidate`](Self::invalidate) is the only way
/// to force a refetch. Status is the exception: a pending status fetch is
/// joined, but a settled one is always replaced by a fresh fetch.
pub struct EntityCache {
    client: ThermostatClient,
    zones: Slots<(), Zones>,
    modes: Slots<ZoneId, Modes>,
    schedules: Slots<ZoneId, Schedules>,
    status: Slots<ZoneId, Status>,
}

impl EntityCache {
    pub fn new(client: ThermostatClient) -> Self {
        Self {
            client,
            zones: Slots::new("zones"),
            modes: Slots::new("modes"),
            schedules: Slots::new("schedules"),
            status: Slots::new("status"),
        }
    }

    pub fn client(&self) -> &ThermostatClient {
        &self.client
    }

    // ── Getters ──────────────────────────────────────────────────────

    pub async fn zones(&self) -> Result<Arc<Zones>, CoreError> {
        let client = self.client.clone();
        self.zones
            .get((), Reuse::Settled, move || fetch_zones(client))
            .await
    }

    pub async fn modes(&self, zone: ZoneId) -> Result<Arc<Modes>, CoreError> {
        let client = self.client.clone();
        self.modes
            .get(zone, Reuse::Settled, move || fetch_modes(client, zone))
            .await
    }

    pub async fn schedules(&self, zone: ZoneId) -> Result<Arc<Schedules>, CoreError> {
        let client = self.client.clone();
        self.schedules
            .get(zone, Reuse::Settled, move || fetch_schedules(client, zone))
            .await
    }

    pub async fn status(&self, zone: ZoneId) -> Result<Arc<Status>, CoreError> {
        let client = self.client.clone();
        self.status
            .get(zone, Reuse::PendingOnly, move || fetch_status(client, zone))
            .await
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Clear the memoized entry for `(kind, zone)` so the next getter call
    /// issues a fresh fetch. `zone` is ignored for [`EntityKind::Zones`],
    /// which has a single global key.
    pub fn invalidate(&self, kind: EntityKind, zone: ZoneId) -> bool {
        match kind {
            EntityKind::Zones => self.zones.invalidate(&()),
            EntityKind::Modes => self.modes.invalidate(&zone),
            EntityKind::Schedules => self.schedules.invalidate(&zone),
            EntityKind::Status => self.status.invalidate(&zone),
        }
    }

    /// Start a fetch for `(kind, zone)` in the background without waiting.
    ///
    /// Modes, schedules and zones are only fetched when nothing is memoized;
    /// status is refetched unless a fetch is already in flight.
    pub fn prefetch(&self, kind: EntityKind, zone: ZoneId) {
        let client = self.client.clone();
        match kind {
            EntityKind::Zones => self
                .zones
                .prefetch((), Reuse::Settled, move || fetch_zones(client)),
            EntityKind::Modes => {
                self.modes
                    .prefetch(zone, Reuse::Settled, move || fetch_modes(client, zone));
            }
            EntityKind::Schedules => {
                self.schedules
                    .prefetch(zone, Reuse::Settled, move || fetch_schedules(client, zone));
            }
            EntityKind::Status => {
                self.status
                    .prefetch(zone, Reuse::PendingOnly, move || fetch_status(client, zone));
            }
        }
    }

    /// Current slot state for `(kind, zone)`, or `None` if nothing is memoized.
    pub fn state(&self, kind: EntityKind, zone: ZoneId) -> Option<SlotState> {
        match kind {
            EntityKind::Zones => self.zones.state(&()),
            EntityKind::Modes => self.modes.state(&zone),
            EntityKind::Schedules => self.schedules.state(&zone),
            EntityKind::Status => self.status.state(&zone),
        }
    }
}

// ── Fetchers ─────────────────────────────────────────────────────────

async fn fetch_zones(client: ThermostatClient) -> Result<Zones, CoreError> {
    Ok(keyed(client.list_zones().await?))
}

async fn fetch_modes(client: ThermostatClient, zone: ZoneId) -> Result<Modes, CoreError> {
    Ok(keyed(client.list_modes(zone.get()).await?))
}

async fn fetch_schedules(client: ThermostatClient, zone: ZoneId) -> Result<Schedules, CoreError> {
    Ok(keyed(client.list_schedules(zone.get()).await?))
}

async fn fetch_status(client: ThermostatClient, zone: ZoneId) -> Result<Status, CoreError> {
    Ok(client.status(zone.get()).await?.into())
}
