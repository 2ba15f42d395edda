#![allow(clippy::unwrap_used)]
// Integration tests for `ThermostatClient` using wiremock.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thermoctl_api::{
    AddModeRequest, AddScheduleRequest, DeleteScheduleRequest, Error, ThermostatClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ThermostatClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ThermostatClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_zones() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": 7, "name": "Den" },
            { "ID": 9, "name": "Attic" }
        ])))
        .mount(&server)
        .await;

    let zones = client.list_zones().await.unwrap();

    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].id, 7);
    assert_eq!(zones[0].name, "Den");
}

#[tokio::test]
async fn test_list_modes_is_zone_scoped() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/mode"))
        .and(query_param("zoneID", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ID": 1,
            "zoneID": 7,
            "name": "Comfort",
            "minTemp": 68.0,
            "maxTemp": 72.0,
            "correction": 0.5
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let modes = client.list_modes(7).await.unwrap();

    assert_eq!(modes.len(), 1);
    assert_eq!(modes[0].name, "Comfort");
    assert_eq!(modes[0].zone_id, Some(7));
}

#[tokio::test]
async fn test_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .and(query_param("zoneID", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Temperature": 70.25,
            "Humidity": 41.0,
            "Heat": true
        })))
        .mount(&server)
        .await;

    let status = client.status(2).await.unwrap();

    assert!((status.temperature - 70.25).abs() < f64::EPSILON);
    assert_eq!(status.humidity, Some(41.0));
    assert_eq!(status.heat, Some(true));
    assert_eq!(status.fan, None);
}

#[tokio::test]
async fn test_fragment_is_plain_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/modes.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div id=\"mainList\"></div>"))
        .mount(&server)
        .await;

    let markup = client.fragment("modes.html").await.unwrap();
    assert_eq!(markup, "<div id=\"mainList\"></div>");
}

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_zones().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "not json"),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_long_non_ascii_body_preview_stops_on_a_char() {
    let (server, client) = setup().await;
    // The 200th char straddles bytes 199..202.
    let body = format!("{}℉ not json", "a".repeat(199));

    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    match client.list_zones().await {
        Err(Error::Deserialization { message, body: got }) => {
            assert_eq!(got, body);
            assert!(message.ends_with("a℉\")"), "{message}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_mode_posts_pascal_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/mode/add"))
        .and(body_json(json!({
            "ZoneID": 7,
            "Name": "Sleep",
            "MinTemp": 62.0,
            "MaxTemp": 66.0,
            "Correction": 0.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 12}"#))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add_mode(&AddModeRequest {
            zone_id: 7,
            name: "Sleep".into(),
            min_temp: 62.0,
            max_temp: 66.0,
            correction: 0.5,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_schedule_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/schedule/add"))
        .and(body_json(json!({
            "ZoneID": 1,
            "ModeID": 3,
            "Priority": 2,
            "DayOfWeek": 2,
            "StartTime": 52200,
            "EndTime": 54000,
            "StartDay": "2024-06-01T00:00:00Z",
            "EndDay": "2024-07-01T00:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add_schedule(&AddScheduleRequest {
            zone_id: 1,
            mode_id: 3,
            priority: 2,
            day_of_week: 2,
            start_time: 52_200,
            end_time: 54_000,
            start_day: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            end_day: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_post_carries_body_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/schedule/delete"))
        .respond_with(ResponseTemplate::new(500).set_body_string("schedule is in use"))
        .mount(&server)
        .await;

    let result = client
        .delete_schedule(&DeleteScheduleRequest { zone_id: 1, id: 4 })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Rejected { status: 500, .. }));
    assert_eq!(err.message(), "schedule is in use");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 9 (discard) on localhost is essentially never listening.
    let client = ThermostatClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
    );

    let err = client.list_zones().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
