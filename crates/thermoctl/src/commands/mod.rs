//! Command dispatch: bridges CLI args -> core navigations -> terminal output.

pub mod config_cmd;
pub mod modes;
pub mod schedules;
pub mod util;
pub mod zone;
pub mod zones;

use thermoctl_core::Thermostat;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::surface::TerminalSurface;

/// The application context every thermostat command runs against.
pub type App = Thermostat<TerminalSurface>;

/// Dispatch a thermostat-bound command to the appropriate handler.
///
/// `zone` is the zone from `--zone` or the active profile, if any.
pub async fn dispatch(
    cmd: Command,
    app: &App,
    global: &GlobalOpts,
    zone: Option<i64>,
) -> Result<(), CliError> {
    match cmd {
        Command::Zones => zones::handle(app, global).await,
        Command::Zone(args) => zone::handle(app, args, global, zone).await,
        Command::Modes(args) => modes::handle(app, args, global, zone).await,
        Command::Schedules(args) => schedules::handle(app, args, global, zone).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not need a thermostat".into(),
        )),
    }
}
