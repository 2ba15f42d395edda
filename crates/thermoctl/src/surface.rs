//! Terminal rendering surface.
//!
//! Collects the views a navigation produces and renders them in the
//! selected output format once the navigation settles.

use owo_colors::OwoColorize;
use serde_json::{Map, Value};
use tabled::Tabled;
use tracing::debug;

use thermoctl_core::codec::DayGlyph;
use thermoctl_core::{
    ModeForm, ModeOption, ModeRow, Page, Priority, ScheduleForm, ScheduleRow, StatusView, Surface,
    View, ZoneRow,
};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// A [`Surface`] that buffers the current page's views for the terminal.
///
/// Fragments carry browser markup and are not printed; a new fragment
/// only clears whatever the previous page left behind.
#[derive(Debug)]
pub struct TerminalSurface {
    format: OutputFormat,
    color: bool,
    views: Vec<View>,
}

impl TerminalSurface {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            format,
            color,
            views: Vec::new(),
        }
    }

    /// Render and drain the buffered views.
    ///
    /// Structured formats emit a single document: one view is printed as
    /// its bare data, several are keyed by view name.
    pub fn take_output(&mut self) -> Result<String, CliError> {
        let views = std::mem::take(&mut self.views);
        match (self.format, views.as_slice()) {
            (_, []) => Ok(String::new()),
            (OutputFormat::Table | OutputFormat::Plain, _) | (_, [_]) => {
                let titled = views.len() > 1 && self.format == OutputFormat::Table;
                let blocks = views
                    .iter()
                    .map(|view| {
                        let body = render_view(view, self.format, self.color)?;
                        Ok(if titled {
                            format!("{}\n{body}", self.title(view))
                        } else {
                            body
                        })
                    })
                    .collect::<Result<Vec<_>, CliError>>()?;
                let sep = if self.format == OutputFormat::Table { "\n\n" } else { "\n" };
                Ok(blocks.join(sep))
            }
            (format, _) => {
                let mut doc = Map::new();
                for view in &views {
                    let (name, data) = split_view(view)?;
                    doc.insert(name, data);
                }
                output::render_single(format, &doc, |_| String::new(), |_| String::new())
            }
        }
    }

    fn title(&self, view: &View) -> String {
        let title = view_title(view);
        if self.color {
            title.bold().underline().to_string()
        } else {
            title.to_owned()
        }
    }
}

impl Surface for TerminalSurface {
    fn inject_stylesheet(&mut self, css: &str) {
        debug!(bytes = css.len(), "ignoring stylesheet");
    }

    fn replace_fragment(&mut self, page: Page, markup: &str) {
        debug!(%page, bytes = markup.len(), "page fragment loaded");
        self.views.clear();
    }

    fn render(&mut self, view: View) {
        self.views.push(view);
    }

    fn show_error(&mut self, message: &str) {
        // The failing command returns the error; main prints it.
        debug!(message, "inline error");
    }
}

// ── View rendering ───────────────────────────────────────────────────

fn view_title(view: &View) -> &'static str {
    match view {
        View::ZoneList(_) => "Zones",
        View::Status(_) => "Status",
        View::ModeOptions(_) | View::ModeList(_) => "Modes",
        View::ZoneSchedules(_) | View::ScheduleList(_) => "Schedules",
        View::ModeForm(_) => "Mode",
        View::ScheduleForm { .. } => "Schedule",
    }
}

/// The view's tag and its data, as serialized.
fn split_view(view: &View) -> Result<(String, Value), CliError> {
    let mut value = serde_json::to_value(view)?;
    let name = value
        .get("view")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let data = value.get_mut("data").map_or(Value::Null, Value::take);
    Ok((name, data))
}

/// Render one view in `format`.
pub fn render_view(view: &View, format: OutputFormat, color: bool) -> Result<String, CliError> {
    match view {
        View::ZoneList(rows) => output::render_list(format, rows, |z| ZoneTableRow::from(z), |z| {
            z.id.to_string()
        }),
        View::Status(status) => output::render_single(format, status, status_detail, |s| {
            format!("{}", s.temperature)
        }),
        View::ModeOptions(options) => {
            let options: Vec<&ModeOption> = options.iter().filter(|o| o.id.is_some()).collect();
            output::render_list(
                format,
                &options,
                |o| OptionTableRow::from(*o),
                |o| o.id.map_or_else(String::new, |id| id.to_string()),
            )
        }
        View::ModeList(rows) => output::render_list(format, rows, |m| ModeTableRow::from(m), |m| {
            m.id.to_string()
        }),
        View::ZoneSchedules(rows) | View::ScheduleList(rows) => output::render_list(
            format,
            rows,
            |s| ScheduleTableRow::new(s, color),
            |s| s.id.to_string(),
        ),
        View::ModeForm(form) => output::render_single(format, form, mode_detail, |f| {
            f.id.clone().unwrap_or_default()
        }),
        View::ScheduleForm { form, modes } => output::render_single(
            format,
            form,
            |f| schedule_detail(f, modes, color),
            |f| f.id.clone().unwrap_or_default(),
        ),
    }
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ZoneTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&ZoneRow> for ZoneTableRow {
    fn from(z: &ZoneRow) -> Self {
        Self {
            id: z.id.get(),
            name: z.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct OptionTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Mode")]
    label: String,
}

impl From<&ModeOption> for OptionTableRow {
    fn from(o: &ModeOption) -> Self {
        Self {
            id: o.id.map_or_else(String::new, |id| id.to_string()),
            label: o.label.clone(),
        }
    }
}

#[derive(Tabled)]
struct ModeTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Correction")]
    correction: String,
}

impl From<&ModeRow> for ModeTableRow {
    fn from(m: &ModeRow) -> Self {
        Self {
            id: m.id.get(),
            name: m.name.clone(),
            range: m.range.clone(),
            correction: m.correction.clone(),
        }
    }
}

#[derive(Tabled)]
struct ScheduleTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

impl ScheduleTableRow {
    fn new(s: &ScheduleRow, color: bool) -> Self {
        Self {
            id: s.id.get(),
            mode: s.mode_name.clone(),
            priority: Priority(s.priority).to_string(),
            days: weekday_strip(&s.weekdays, color),
            time: format!("{} - {}", s.start_time, s.end_time),
            start: s.start_day.clone(),
            end: s.end_day.clone(),
        }
    }
}

/// `SMTWTFS`, selected days highlighted. Without color, unselected days
/// show as `-`.
fn weekday_strip(glyphs: &[DayGlyph; 7], color: bool) -> String {
    glyphs
        .iter()
        .map(|g| match (g.selected, color) {
            (true, true) => g.letter.green().bold().to_string(),
            (false, true) => g.letter.dimmed().to_string(),
            (true, false) => g.letter.to_string(),
            (false, false) => "-".to_owned(),
        })
        .collect()
}

// ── Detail blocks ────────────────────────────────────────────────────

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

fn on_off(value: Option<bool>) -> String {
    match value {
        Some(true) => "on".into(),
        Some(false) => "off".into(),
        None => "-".into(),
    }
}

fn status_detail(s: &StatusView) -> String {
    output::detail_block(&[
        ("Temperature", format!("{}℉", s.temperature)),
        ("Humidity", s.humidity.map_or_else(|| "-".into(), |h| format!("{h}%"))),
        ("Heat index", or_dash(s.heat_index)),
        (
            "Target",
            match (s.min_temp, s.max_temp) {
                (Some(min), Some(max)) => format!("{min} to {max}℉"),
                _ => "-".into(),
            },
        ),
        ("Correction", or_dash(s.correction)),
        ("Active mode", or_dash(s.active_mode)),
        ("Active schedule", or_dash(s.active_schedule)),
        ("Heat", on_off(s.equipment.heat)),
        ("Cooling", on_off(s.equipment.cooling)),
        ("Fan", on_off(s.equipment.fan)),
    ])
}

fn mode_detail(f: &ModeForm) -> String {
    output::detail_block(&[
        ("ID", or_dash(f.id.as_deref())),
        ("Name", f.name.clone()),
        ("Min", format!("{}℉", f.min_temp)),
        ("Max", format!("{}℉", f.max_temp)),
        ("Correction", format!("±{}℉", f.offset)),
    ])
}

fn schedule_detail(f: &ScheduleForm, modes: &[ModeOption], color: bool) -> String {
    let mode = modes
        .iter()
        .find(|o| o.id.is_some_and(|id| id.to_string() == f.mode_id))
        .map_or_else(|| f.mode_id.clone(), |o| o.label.clone());
    let glyphs = thermoctl_core::codec::mask_to_weekday_glyphs(
        thermoctl_core::codec::weekday_flags_to_mask(&f.weekdays),
    );
    let priority = f
        .priority
        .trim()
        .parse()
        .map_or_else(|_| f.priority.clone(), |p| Priority(p).to_string());
    output::detail_block(&[
        ("ID", or_dash(f.id.as_deref())),
        ("Mode", mode),
        ("Priority", priority),
        ("Days", weekday_strip(&glyphs, color)),
        ("Time", format!("{} - {}", f.start_time, f.end_time)),
        ("From", f.start_date.clone()),
        ("Until", f.end_date.clone()),
    ])
}
