// thermoctl-api: Async Rust client for the thermostat control API

pub mod client;
pub mod error;
pub mod models;
pub mod modes;
pub mod pages;
pub mod schedules;
pub mod status;
pub mod transport;
pub mod zones;

pub use client::ThermostatClient;
pub use error::Error;
pub use models::{
    AddModeRequest, AddScheduleRequest, DeleteScheduleRequest, EditModeRequest, ModeRecord,
    ScheduleRecord, StatusRecord, ZoneRecord,
};
pub use transport::{TlsMode, TransportConfig};
