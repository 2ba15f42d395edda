//! Schedule command handlers.

use chrono::{Local, Weekday};

use thermoctl_core::codec;
use thermoctl_core::{Route, ScheduleForm, ScheduleId};

use crate::cli::{GlobalOpts, ScheduleFields, SchedulesArgs, SchedulesCommand};
use crate::error::CliError;

use super::{App, util};

/// Overlay the flags that were given onto `form`.
fn apply(form: &mut ScheduleForm, fields: ScheduleFields) {
    if let Some(mode) = fields.mode {
        form.mode_id = mode.to_string();
    }
    if let Some(priority) = fields.priority {
        form.priority = priority.to_string();
    }
    if let Some(days) = fields.days {
        let days: Vec<Weekday> = days.into_iter().map(Weekday::from).collect();
        form.weekdays = codec::weekday_flags_from(&days);
    }
    if let Some(start) = fields.start {
        form.start_time = start;
    }
    if let Some(end) = fields.end {
        form.end_time = end;
    }
    if let Some(from) = fields.from {
        form.start_date = from;
    }
    if let Some(until) = fields.until {
        form.end_date = until;
    }
}

fn not_found(id: i64) -> CliError {
    CliError::NotFound {
        resource_type: "schedule".into(),
        identifier: id.to_string(),
        list_command: "schedules list".into(),
    }
}

pub async fn handle(
    app: &App,
    args: SchedulesArgs,
    global: &GlobalOpts,
    zone: Option<i64>,
) -> Result<(), CliError> {
    let zone = util::select_zone(app, zone).await?;

    match args.command {
        SchedulesCommand::List => util::navigate(app, Route::Schedules, global).await,

        SchedulesCommand::Show { id } => {
            util::navigate(app, Route::EditSchedule(ScheduleId(id)), global).await
        }

        SchedulesCommand::Add(fields) => {
            let mut form = ScheduleForm::starting(Local::now().date_naive());
            apply(&mut form, fields);
            let nav = app.submit_add_schedule(&form).await?;
            util::done("Schedule added", global);
            util::show(app, Route::Schedules, nav, global).await
        }

        SchedulesCommand::Edit { id, fields } => {
            let schedules = app.cache().schedules(zone).await?;
            let schedule = schedules.get(&ScheduleId(id)).ok_or_else(|| not_found(id))?;

            let mut form = ScheduleForm::from_schedule(schedule);
            apply(&mut form, fields);
            let nav = app.submit_edit_schedule(&form).await?;
            util::done(&format!("Schedule {id} replaced"), global);
            util::show(app, Route::Schedules, nav, global).await
        }

        SchedulesCommand::Delete { id } => {
            let schedules = app.cache().schedules(zone).await?;
            if !schedules.contains_key(&ScheduleId(id)) {
                return Err(not_found(id));
            }
            if !util::confirm(&format!("Delete schedule {id}?"), global.yes)? {
                return Ok(());
            }
            let nav = app.submit_delete_schedule(ScheduleId(id)).await?;
            util::done(&format!("Schedule {id} deleted"), global);
            util::show(app, Route::Schedules, nav, global).await
        }
    }
}
