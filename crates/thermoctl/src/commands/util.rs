//! Shared helpers for command handlers.

use thermoctl_core::{Navigation, Route, ZoneId};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::App;

/// Turn a finished navigation into a command result.
pub fn settle(route: Route, nav: Navigation) -> Result<(), CliError> {
    match nav {
        Navigation::Displayed => Ok(()),
        Navigation::Failed(err) => Err(err.into()),
        Navigation::Aborted => Err(CliError::PageUnavailable {
            page: route.page().to_string(),
        }),
        Navigation::Superseded => Err(CliError::Internal(format!(
            "navigation to {} was superseded",
            route.page()
        ))),
    }
}

/// Settle `nav`, then print whatever the page rendered.
pub async fn show(
    app: &App,
    route: Route,
    nav: Navigation,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    settle(route, nav)?;
    let out = app.surface().await.take_output()?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Navigate to `route` and print the result.
pub async fn navigate(app: &App, route: Route, global: &GlobalOpts) -> Result<(), CliError> {
    let nav = app.navigate(route).await;
    show(app, route, nav, global).await
}

/// Pick the zone a zone-scoped command works on.
///
/// Falls back to the only zone the thermostat has when none was given.
pub async fn resolve_zone(app: &App, zone: Option<i64>) -> Result<ZoneId, CliError> {
    if let Some(id) = zone {
        return Ok(ZoneId(id));
    }
    let zones = app.cache().zones().await?;
    let mut ids = zones.keys();
    match (ids.next(), ids.next()) {
        (Some(&only), None) => {
            tracing::debug!(zone = %only, "using the only zone");
            Ok(only)
        }
        _ => Err(CliError::NoZone),
    }
}

/// Resolve the zone and make it current.
pub async fn select_zone(app: &App, zone: Option<i64>) -> Result<ZoneId, CliError> {
    let zone = resolve_zone(app, zone).await?;
    app.select_zone(zone);
    Ok(zone)
}

/// Report a completed change on stderr unless quiet.
pub fn done(message: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("✓ {message}");
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
