// Shared fixtures for thermoctl-core integration tests.
#![allow(clippy::unwrap_used, dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thermoctl_api::ThermostatClient;
use thermoctl_core::{Page, Surface, Thermostat, View};

// ── Recording surface ───────────────────────────────────────────────

/// Everything a surface was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Stylesheet(String),
    Fragment(Page, String),
    View(View),
    Error(String),
}

/// A surface that records calls. Clones share one log, so a test keeps a
/// handle while the app owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<Vec<Drawn>>>,
}

impl RecordingSurface {
    pub fn log(&self) -> Vec<Drawn> {
        self.log.lock().unwrap().clone()
    }

    pub fn views(&self) -> Vec<View> {
        self.log()
            .into_iter()
            .filter_map(|d| match d {
                Drawn::View(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|d| match d {
                Drawn::Error(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn pages(&self) -> Vec<Page> {
        self.log()
            .into_iter()
            .filter_map(|d| match d {
                Drawn::Fragment(p, _) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn push(&self, drawn: Drawn) {
        self.log.lock().unwrap().push(drawn);
    }
}

impl Surface for RecordingSurface {
    fn inject_stylesheet(&mut self, css: &str) {
        self.push(Drawn::Stylesheet(css.to_owned()));
    }

    fn replace_fragment(&mut self, page: Page, markup: &str) {
        self.push(Drawn::Fragment(page, markup.to_owned()));
    }

    fn render(&mut self, view: View) {
        self.push(Drawn::View(view));
    }

    fn show_error(&mut self, message: &str) {
        self.push(Drawn::Error(message.to_owned()));
    }
}

// ── App + server ────────────────────────────────────────────────────

pub async fn setup() -> (MockServer, Thermostat<RecordingSurface>, RecordingSurface) {
    let server = MockServer::start().await;
    let client = ThermostatClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
    );
    let surface = RecordingSurface::default();
    let app = Thermostat::new(client, surface.clone());
    (server, app, surface)
}

// ── Mocks ───────────────────────────────────────────────────────────

/// Serve `<page>.html` with a marker body.
pub async fn mount_page(server: &MockServer, page: Page) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{}", page.fragment_name())))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("<div id=\"{page}\"></div>")))
        .mount(server)
        .await;
}

pub async fn mount_all_pages(server: &MockServer) {
    use strum::IntoEnumIterator;
    for page in Page::iter() {
        mount_page(server, page).await;
    }
}

pub async fn mount_zone_json(server: &MockServer, resource: &str, zone: i64, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{resource}")))
        .and(query_param("zoneID", zone.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Like [`mount_zone_json`] but answers slowly and insists on `calls` hits.
pub async fn mount_zone_json_counted(
    server: &MockServer,
    resource: &str,
    zone: i64,
    body: Value,
    delay: Duration,
    calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{resource}")))
        .and(query_param("zoneID", zone.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(delay),
        )
        .expect(calls)
        .mount(server)
        .await;
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn modes_json(zone: i64) -> Value {
    json!([
        { "ID": 3, "zoneID": zone, "name": "Comfort", "minTemp": 68.0, "maxTemp": 72.0, "correction": 0.5 },
        { "ID": 4, "zoneID": zone, "name": "Away", "minTemp": 60.0, "maxTemp": 80.0, "correction": 1.0 }
    ])
}

pub fn schedules_json(zone: i64) -> Value {
    json!([{
        "ID": 11,
        "zoneID": zone,
        "modeID": 3,
        "priority": 2,
        "dayOfWeek": 62,
        "startDay": "2024-01-01T00:00:00Z",
        "endDay": "2024-12-31T00:00:00Z",
        "startTime": 25200,
        "endTime": 79200
    }])
}

pub fn status_json(temperature: f64) -> Value {
    json!({ "Temperature": temperature })
}
