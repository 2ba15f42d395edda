//! Zone listing.

use thermoctl_core::Route;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::{App, util};

pub async fn handle(app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    util::navigate(app, Route::Main, global).await
}
