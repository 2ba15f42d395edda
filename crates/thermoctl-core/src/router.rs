// ── Page router ──
//
// navigate(route):
//   1. fetch `<page>.html`          failure → logged, previous page kept
//   2. replace the fragment          superseded → dropped
//   3. hydrate from the cache        failure → shown inline, never raised
//
// Every navigation takes a ticket when it starts. The surface belongs to the
// navigation that last replaced the fragment, and a fragment never replaces
// one from a newer ticket. An aborted navigation never takes the surface, so
// the page on screen keeps hydrating.

use std::sync::atomic::Ordering;

use chrono::Local;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::app::Thermostat;
use crate::error::CoreError;
use crate::forms::{ModeForm, ScheduleForm};
use crate::model::{ModeId, ScheduleId};
use crate::surface::{self, ModeOption, StatusView, Surface, View};

/// A page the server serves a fragment for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Main,
    Zone,
    Modes,
    #[strum(serialize = "addModes")]
    #[serde(rename = "addModes")]
    AddMode,
    #[strum(serialize = "editModes")]
    #[serde(rename = "editModes")]
    EditMode,
    Schedules,
    AddSchedule,
    EditSchedule,
}

impl Page {
    /// Name of the fragment resource, e.g. `editModes.html`.
    pub fn fragment_name(self) -> String {
        format!("{self}.html")
    }
}

/// A page plus the argument its hydration needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Main,
    Zone,
    Modes,
    AddMode,
    EditMode(ModeId),
    Schedules,
    AddSchedule,
    EditSchedule(ScheduleId),
}

impl Route {
    pub fn page(self) -> Page {
        match self {
            Self::Main => Page::Main,
            Self::Zone => Page::Zone,
            Self::Modes => Page::Modes,
            Self::AddMode => Page::AddMode,
            Self::EditMode(_) => Page::EditMode,
            Self::Schedules => Page::Schedules,
            Self::AddSchedule => Page::AddSchedule,
            Self::EditSchedule(_) => Page::EditSchedule,
        }
    }
}

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Fragment shown and fully hydrated.
    Displayed,
    /// Fragment shown, but hydration stopped on an error that was shown
    /// inline.
    Failed(CoreError),
    /// A later navigation took over; nothing further was delivered.
    Superseded,
    /// The fragment could not be fetched; the previous page is still shown.
    Aborted,
}

impl<S: Surface> Thermostat<S> {
    /// Fetch, display and hydrate `route`'s page.
    pub async fn navigate(&self, route: Route) -> Navigation {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let page = route.page();
        debug!(%page, generation, "navigating");

        let markup = match self.client().fragment(&page.fragment_name()).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(%page, error = %e, "fragment fetch failed, keeping current page");
                return Navigation::Aborted;
            }
        };

        {
            let mut surface = self.inner.surface.lock().await;
            if self.inner.owner.load(Ordering::SeqCst) > generation {
                debug!(%page, generation, "fragment superseded");
                return Navigation::Superseded;
            }
            self.inner.owner.store(generation, Ordering::SeqCst);
            surface.replace_fragment(page, &markup);
        }

        match self.hydrate(route, generation).await {
            Ok(true) => Navigation::Displayed,
            Ok(false) => Navigation::Superseded,
            Err(err) => {
                warn!(%page, error = %err, "hydration failed");
                let mut surface = self.inner.surface.lock().await;
                if !self.is_current(generation) {
                    return Navigation::Superseded;
                }
                surface.show_error(&err.to_string());
                Navigation::Failed(err)
            }
        }
    }

    /// Whether `generation` still owns the surface.
    fn is_current(&self, generation: u64) -> bool {
        self.inner.owner.load(Ordering::SeqCst) == generation
    }

    /// Render `view` if `generation` still owns the surface.
    async fn emit(&self, generation: u64, view: View) -> bool {
        let mut surface = self.inner.surface.lock().await;
        if !self.is_current(generation) {
            return false;
        }
        surface.render(view);
        true
    }

    /// Populate the page. `Ok(false)` means a newer navigation took over.
    async fn hydrate(&self, route: Route, generation: u64) -> Result<bool, CoreError> {
        let cache = self.cache();
        match route {
            Route::Main => {
                let zones = cache.zones().await?;
                Ok(self
                    .emit(generation, View::ZoneList(surface::zone_rows(&zones)))
                    .await)
            }

            Route::Zone => {
                let zone = self.session().require_zone()?;

                let status = cache.status(zone).await?;
                if !self
                    .emit(generation, View::Status(StatusView::from(&*status)))
                    .await
                {
                    return Ok(false);
                }

                let modes = cache.modes(zone).await?;
                if !self
                    .emit(generation, View::ModeOptions(surface::mode_options(&modes)))
                    .await
                {
                    return Ok(false);
                }

                let schedules = cache.schedules(zone).await?;
                Ok(self
                    .emit(
                        generation,
                        View::ZoneSchedules(surface::schedule_rows(&schedules, &modes)),
                    )
                    .await)
            }

            Route::Modes => {
                let zone = self.session().require_zone()?;
                let modes = cache.modes(zone).await?;
                Ok(self
                    .emit(generation, View::ModeList(surface::mode_rows(&modes)))
                    .await)
            }

            Route::AddMode => {
                self.session().require_zone()?;
                Ok(self
                    .emit(generation, View::ModeForm(ModeForm::default()))
                    .await)
            }

            Route::EditMode(id) => {
                let zone = self.session().require_zone()?;
                let modes = cache.modes(zone).await?;
                let mode = modes.get(&id).ok_or(CoreError::NotFound {
                    entity: "mode",
                    id: id.get(),
                })?;
                Ok(self
                    .emit(generation, View::ModeForm(ModeForm::from(mode)))
                    .await)
            }

            Route::Schedules => {
                let zone = self.session().require_zone()?;
                let schedules = cache.schedules(zone).await?;
                let modes = cache.modes(zone).await?;
                Ok(self
                    .emit(
                        generation,
                        View::ScheduleList(surface::schedule_rows(&schedules, &modes)),
                    )
                    .await)
            }

            Route::AddSchedule => {
                let zone = self.session().require_zone()?;
                let modes = cache.modes(zone).await?;
                let mut options = vec![ModeOption::blank()];
                options.extend(surface::mode_options(&modes));
                let form = ScheduleForm::starting(Local::now().date_naive());
                Ok(self
                    .emit(generation, View::ScheduleForm { form, modes: options })
                    .await)
            }

            Route::EditSchedule(id) => {
                let zone = self.session().require_zone()?;
                let schedules = cache.schedules(zone).await?;
                let schedule = schedules.get(&id).ok_or(CoreError::NotFound {
                    entity: "schedule",
                    id: id.get(),
                })?;
                let modes = cache.modes(zone).await?;
                let form = ScheduleForm::from_schedule(schedule);
                Ok(self
                    .emit(
                        generation,
                        View::ScheduleForm {
                            form,
                            modes: surface::mode_options(&modes),
                        },
                    )
                    .await)
            }
        }
    }
}
