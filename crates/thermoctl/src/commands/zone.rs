//! Zone overview: live status, modes and schedules of one zone.

use thermoctl_core::Route;

use crate::cli::{GlobalOpts, ZoneArgs};
use crate::error::CliError;

use super::{App, util};

pub async fn handle(
    app: &App,
    args: ZoneArgs,
    global: &GlobalOpts,
    zone: Option<i64>,
) -> Result<(), CliError> {
    let zone = util::resolve_zone(app, args.id.or(zone)).await?;
    let nav = app.open_zone(zone).await;
    util::show(app, Route::Zone, nav, global).await
}
