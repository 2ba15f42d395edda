//! Data synchronization and page orchestration between `thermoctl-api` and
//! front ends (CLI, browser shells, tests).
//!
//! - **[`Thermostat`]**: the application context. Cheap to clone; owns the
//!   API client, the [`EntityCache`], the [`Session`] zone selection and
//!   the [`Surface`] output goes to. [`start()`](Thermostat::start) injects
//!   the stylesheet and shows the zone list.
//!
//! - **[`EntityCache`]**: memoized, single-flight fetches of zones, modes,
//!   schedules and live status built on `DashMap` slots. At most one fetch
//!   per key is ever in flight; mutations [`invalidate`](EntityCache::invalidate)
//!   the affected entry.
//!
//! - **Page router** ([`router`]): [`navigate(route)`](Thermostat::navigate)
//!   fetches a page fragment, swaps it into the surface and hydrates it from
//!   the cache. Stale navigations are discarded by generation.
//!
//! - **Form submitters** ([`forms`]): raw form fields encoded through the
//!   [`codec`] into API requests; success invalidates and re-navigates,
//!   failure is shown inline.
//!
//! - **Wire codec** ([`codec`]): clock times, weekday masks and date
//!   conversions between domain values and wire/form text.

pub mod app;
pub mod cache;
pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod forms;
pub mod model;
pub mod router;
pub mod session;
pub mod surface;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::Thermostat;
pub use cache::{EntityCache, EntityKind, SlotState};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use forms::{ModeForm, ScheduleForm};
pub use router::{Navigation, Page, Route};
pub use session::Session;
pub use surface::{ModeOption, ModeRow, ScheduleRow, StatusView, Surface, View, ZoneRow};

pub use model::{
    Equipment, Mode, ModeId, Modes, Priority, Schedule, ScheduleId, Schedules, Status, Zone,
    ZoneId, Zones,
};
