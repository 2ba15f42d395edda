// ── Application context ──
//
// One `Thermostat` per running front end. Owns the API client, the entity
// cache, the zone selection and the rendering surface; navigation and
// form submission are implemented on it in `router` and `forms`.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use thermoctl_api::ThermostatClient;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::cache::{EntityCache, EntityKind};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::ZoneId;
use crate::router::{Navigation, Route};
use crate::session::Session;
use crate::surface::Surface;

/// The application instance.
///
/// Cheaply cloneable via `Arc<Inner>`; clones share the cache, selection
/// and surface.
pub struct Thermostat<S> {
    pub(crate) inner: Arc<Inner<S>>,
}

pub(crate) struct Inner<S> {
    client: ThermostatClient,
    cache: EntityCache,
    session: Session,
    pub(crate) surface: Mutex<S>,
    /// Ticket source; bumped by every navigation as it starts.
    pub(crate) generation: AtomicU64,
    /// Ticket of the navigation whose fragment is on the surface. Only
    /// written under the surface lock.
    pub(crate) owner: AtomicU64,
}

impl<S> Clone for Thermostat<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Surface> Thermostat<S> {
    pub fn new(client: ThermostatClient, surface: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache: EntityCache::new(client.clone()),
                client,
                session: Session::new(),
                surface: Mutex::new(surface),
                generation: AtomicU64::new(0),
                owner: AtomicU64::new(0),
            }),
        }
    }

    /// Build the API client from `config` and wrap it.
    pub fn from_config(config: &ClientConfig, surface: S) -> Result<Self, CoreError> {
        Ok(Self::new(config.build_client()?, surface))
    }

    pub fn client(&self) -> &ThermostatClient {
        &self.inner.client
    }

    pub fn cache(&self) -> &EntityCache {
        &self.inner.cache
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Exclusive access to the surface. Hold it briefly: navigations wait
    /// on it to deliver output.
    pub async fn surface(&self) -> MutexGuard<'_, S> {
        self.inner.surface.lock().await
    }

    /// Install the stylesheet, then show the zone list.
    ///
    /// A missing stylesheet is logged and otherwise ignored.
    pub async fn start(&self) -> Navigation {
        match self.client().stylesheet().await {
            Ok(css) => self.surface().await.inject_stylesheet(&css),
            Err(e) => warn!(error = %e, "failed loading stylesheet"),
        }
        self.navigate(Route::Main).await
    }

    /// Make `zone` current and start fetching its entities.
    ///
    /// The selection is updated before anything is invalidated or fetched,
    /// so no fetch issued from here on can run against the previous zone.
    /// Every selection issues a fresh status fetch.
    pub fn select_zone(&self, zone: ZoneId) {
        let previous = self.session().select(zone);
        info!(%zone, ?previous, "zone selected");

        for kind in [EntityKind::Status, EntityKind::Modes, EntityKind::Schedules] {
            self.cache().invalidate(kind, zone);
            self.cache().prefetch(kind, zone);
        }
        debug!(%zone, "zone entities prefetching");
    }

    /// Select `zone` and show its page.
    pub async fn open_zone(&self, zone: ZoneId) -> Navigation {
        self.select_zone(zone);
        self.navigate(Route::Zone).await
    }
}
