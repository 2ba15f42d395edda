//! Mode command handlers.

use thermoctl_core::{ModeForm, ModeId, Route};

use crate::cli::{GlobalOpts, ModesArgs, ModesCommand};
use crate::error::CliError;

use super::{App, util};

pub async fn handle(
    app: &App,
    args: ModesArgs,
    global: &GlobalOpts,
    zone: Option<i64>,
) -> Result<(), CliError> {
    let zone = util::select_zone(app, zone).await?;

    match args.command {
        ModesCommand::List => util::navigate(app, Route::Modes, global).await,

        ModesCommand::Show { id } => {
            util::navigate(app, Route::EditMode(ModeId(id)), global).await
        }

        ModesCommand::Add {
            name,
            min,
            max,
            correction,
        } => {
            let form = ModeForm {
                id: None,
                name,
                min_temp: min.to_string(),
                max_temp: max.to_string(),
                offset: correction.to_string(),
            };
            let nav = app.submit_add_mode(&form).await?;
            util::done(&format!("Mode '{}' added", form.name.trim()), global);
            util::show(app, Route::Modes, nav, global).await
        }

        ModesCommand::Edit {
            id,
            name,
            min,
            max,
            correction,
        } => {
            let modes = app.cache().modes(zone).await?;
            let mode = modes.get(&ModeId(id)).ok_or_else(|| CliError::NotFound {
                resource_type: "mode".into(),
                identifier: id.to_string(),
                list_command: "modes list".into(),
            })?;

            let mut form = ModeForm::from(mode);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(min) = min {
                form.min_temp = min.to_string();
            }
            if let Some(max) = max {
                form.max_temp = max.to_string();
            }
            if let Some(correction) = correction {
                form.offset = correction.to_string();
            }

            let nav = app.submit_edit_mode(&form).await?;
            util::done(&format!("Mode {id} updated"), global);
            util::show(app, Route::Modes, nav, global).await
        }
    }
}
