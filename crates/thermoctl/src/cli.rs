//! Clap derive structures for the `thermoctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use chrono::Weekday;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// thermoctl -- drive a home thermostat from the command line
#[derive(Debug, Parser)]
#[command(
    name = "thermoctl",
    version,
    about = "Manage thermostat zones, modes and schedules from the command line",
    long_about = "Browse thermostat zones, read live temperatures, and manage the\n\
        temperature modes and weekly schedules of each zone.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Thermostat profile to use
    #[arg(long, short = 'p', env = "THERMOCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Thermostat URL (overrides profile)
    #[arg(long, short = 'u', env = "THERMOCTL_URL", global = true)]
    pub url: Option<String>,

    /// Zone id (overrides profile)
    #[arg(long, short = 'z', env = "THERMOCTL_ZONE", global = true)]
    pub zone: Option<i64>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "THERMOCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "THERMOCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: from config, else 30]
    #[arg(long, env = "THERMOCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List thermostat zones
    #[command(alias = "z")]
    Zones,

    /// Show a zone's live status, modes and schedules
    Zone(ZoneArgs),

    /// Manage temperature modes of a zone
    #[command(alias = "m")]
    Modes(ModesArgs),

    /// Manage weekly schedules of a zone
    #[command(alias = "s")]
    Schedules(SchedulesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Zone ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ZoneArgs {
    /// Zone id [default: --zone, else the profile's zone]
    pub id: Option<i64>,
}

// ── Modes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModesArgs {
    #[command(subcommand)]
    pub command: ModesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModesCommand {
    /// List modes
    #[command(alias = "ls")]
    List,

    /// Show one mode
    Show {
        /// Mode id
        id: i64,
    },

    /// Create a mode
    Add {
        /// Mode name
        #[arg(long)]
        name: String,

        /// Lower bound of the band
        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        /// Upper bound of the band
        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        /// Sensor calibration correction
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        correction: f64,
    },

    /// Update a mode; unset fields keep their current value
    Edit {
        /// Mode id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        correction: Option<f64>,
    },
}

// ── Schedules ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchedulesArgs {
    #[command(subcommand)]
    pub command: SchedulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchedulesCommand {
    /// List schedules
    #[command(alias = "ls")]
    List,

    /// Show one schedule
    Show {
        /// Schedule id
        id: i64,
    },

    /// Create a schedule
    Add(ScheduleFields),

    /// Replace a schedule; unset fields keep their current value
    Edit {
        /// Schedule id
        id: i64,

        #[command(flatten)]
        fields: ScheduleFields,
    },

    /// Delete a schedule
    #[command(alias = "rm")]
    Delete {
        /// Schedule id
        id: i64,
    },
}

/// Schedule fields. Required when adding, optional overrides when editing.
#[derive(Debug, Args)]
pub struct ScheduleFields {
    /// Mode id to activate
    #[arg(long)]
    pub mode: Option<i64>,

    /// Priority (1 default, 2 scheduled, 3 override, 4 custom)
    #[arg(long)]
    pub priority: Option<i64>,

    /// Active weekdays, comma separated (e.g. mon,tue,fri)
    #[arg(long, value_delimiter = ',')]
    pub days: Option<Vec<DayArg>>,

    /// Start time of day, HH:MM (24-hour)
    #[arg(long)]
    pub start: Option<String>,

    /// End time of day, HH:MM (24-hour)
    #[arg(long)]
    pub end: Option<String>,

    /// First day the schedule applies, YYYY-MM-DD[THH:MM] local time
    #[arg(long)]
    pub from: Option<String>,

    /// Last day the schedule applies, YYYY-MM-DD[THH:MM] local time
    #[arg(long)]
    pub until: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl From<DayArg> for Weekday {
    fn from(day: DayArg) -> Self {
        match day {
            DayArg::Sun => Weekday::Sun,
            DayArg::Mon => Weekday::Mon,
            DayArg::Tue => Weekday::Tue,
            DayArg::Wed => Weekday::Wed,
            DayArg::Thu => Weekday::Thu,
            DayArg::Fri => Weekday::Fri,
            DayArg::Sat => Weekday::Sat,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file interactively
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}
