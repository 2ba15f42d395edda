#![allow(clippy::unwrap_used)]
// Page router: fragment swap, hydration order, error surfacing and
// superseded navigations.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{
    Drawn, RecordingSurface, mount_all_pages, mount_page, mount_zone_json, modes_json,
    schedules_json, setup, status_json,
};
use thermoctl_core::{
    ClientConfig, CoreError, ModeId, Navigation, Page, Route, ScheduleId, Thermostat, View,
    ZoneId, ZoneRow,
};

async fn mount_zones(server: &wiremock::MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "ID": 7, "name": "Den" }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn start_injects_stylesheet_then_shows_zones() {
    let (server, app, surface) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/thermostat.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body { margin: 0 }"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, Page::Main).await;
    mount_zones(&server).await;

    assert_eq!(app.start().await, Navigation::Displayed);

    let log = surface.log();
    assert_eq!(log[0], Drawn::Stylesheet("body { margin: 0 }".into()));
    assert_eq!(log[1], Drawn::Fragment(Page::Main, "<div id=\"main\"></div>".into()));
    assert_eq!(
        log[2],
        Drawn::View(View::ZoneList(vec![ZoneRow {
            id: ZoneId(7),
            name: "Den".into()
        }]))
    );
}

#[tokio::test]
async fn missing_stylesheet_does_not_block_start() {
    let (server, app, surface) = setup().await;
    mount_page(&server, Page::Main).await;
    mount_zones(&server).await;

    assert_eq!(app.start().await, Navigation::Displayed);
    assert!(!surface.log().iter().any(|d| matches!(d, Drawn::Stylesheet(_))));
    assert_eq!(surface.pages(), vec![Page::Main]);
}

#[tokio::test]
async fn selecting_den_scopes_requests_to_zone_7() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;
    mount_zones(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/mode"))
        .and(query_param("zoneID", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(modes_json(7)))
        .expect(1)
        .mount(&server)
        .await;
    mount_zone_json(&server, "schedule", 7, schedules_json(7)).await;
    mount_zone_json(&server, "status", 7, status_json(70.44)).await;

    app.navigate(Route::Main).await;
    let zones = app.cache().zones().await.unwrap();
    let den = zones.values().find(|z| z.name == "Den").unwrap().id;

    assert_eq!(app.open_zone(den).await, Navigation::Displayed);
    assert_eq!(app.session().zone(), Some(ZoneId(7)));
    // Second read of the same zone's modes is served from the cache.
    assert_eq!(app.navigate(Route::Modes).await, Navigation::Displayed);

    let views = surface.views();
    // main: zone list; zone: status, mode options, schedules; modes: list
    assert_eq!(views.len(), 5);
    match &views[1] {
        View::Status(status) => assert_eq!(status.temperature, 70.4),
        other => panic!("expected status first, got {other:?}"),
    }
    match &views[2] {
        View::ModeOptions(options) => {
            assert_eq!(options[0].id, Some(ModeId(3)));
            assert_eq!(options[0].label, "Comfort (68, 72 ±0.5)");
        }
        other => panic!("expected mode options second, got {other:?}"),
    }
    match &views[3] {
        View::ZoneSchedules(rows) => {
            assert_eq!(rows[0].id, ScheduleId(11));
            assert_eq!(rows[0].mode_name, "Comfort");
            assert_eq!(rows[0].start_time, "07:00");
            assert_eq!(rows[0].end_time, "22:00");
        }
        other => panic!("expected schedules third, got {other:?}"),
    }
    assert!(matches!(&views[4], View::ModeList(rows) if rows.len() == 2));
}

#[tokio::test]
async fn rejected_modes_fetch_is_shown_not_raised() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/mode"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;
    mount_zone_json(&server, "schedule", 1, json!([])).await;
    mount_zone_json(&server, "status", 1, status_json(70.0)).await;

    app.select_zone(ZoneId(1));
    let outcome = app.navigate(Route::Modes).await;

    assert_eq!(
        outcome,
        Navigation::Failed(CoreError::Remote {
            message: "db down".into()
        })
    );
    assert_eq!(surface.pages(), vec![Page::Modes]);
    assert_eq!(surface.errors(), vec!["db down".to_owned()]);
    assert!(surface.views().is_empty());
}

#[tokio::test]
async fn fragment_failure_keeps_previous_page() {
    let (server, app, surface) = setup().await;
    mount_page(&server, Page::Main).await;
    mount_zones(&server).await;

    app.navigate(Route::Main).await;
    // schedules.html is not served
    assert_eq!(app.navigate(Route::Schedules).await, Navigation::Aborted);

    assert_eq!(surface.pages(), vec![Page::Main]);
    assert!(surface.errors().is_empty());
}

#[tokio::test]
async fn later_navigation_supersedes_a_slow_one() {
    let (server, app, surface) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/schedules.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<div id=\"schedules\"></div>")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_page(&server, Page::Modes).await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, schedules_json(1)).await;
    mount_zone_json(&server, "status", 1, status_json(70.0)).await;
    app.select_zone(ZoneId(1));

    let (slow, fast) = tokio::join!(app.navigate(Route::Schedules), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        app.navigate(Route::Modes).await
    });

    assert_eq!(slow, Navigation::Superseded);
    assert_eq!(fast, Navigation::Displayed);
    assert_eq!(surface.pages(), vec![Page::Modes]);
    assert_eq!(surface.views().len(), 1);
}

#[tokio::test]
async fn aborted_navigation_leaves_hydrating_page_in_charge() {
    let (server, app, surface) = setup().await;
    mount_page(&server, Page::Zone).await;
    // modes.html is not served
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .and(query_param("zoneID", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_json(70.0))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, schedules_json(1)).await;
    app.select_zone(ZoneId(1));

    let (zone, modes) = tokio::join!(app.navigate(Route::Zone), async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        app.navigate(Route::Modes).await
    });

    assert_eq!(zone, Navigation::Displayed);
    assert_eq!(modes, Navigation::Aborted);
    assert_eq!(surface.pages(), vec![Page::Zone]);
    let views = surface.views();
    assert_eq!(views.len(), 3);
    assert!(matches!(&views[0], View::Status(_)));
    assert!(matches!(&views[2], View::ZoneSchedules(rows) if rows[0].id == ScheduleId(11)));
}

#[tokio::test]
async fn hung_status_fails_after_the_request_timeout() {
    let server = wiremock::MockServer::start().await;
    let mut config = ClientConfig::new(url::Url::parse(&server.uri()).unwrap());
    config.timeout = Duration::from_millis(200);
    let surface = RecordingSurface::default();
    let app = Thermostat::from_config(&config, surface.clone()).unwrap();
    mount_page(&server, Page::Zone).await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_json(70.0))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, schedules_json(1)).await;
    app.select_zone(ZoneId(1));

    let outcome = tokio::time::timeout(Duration::from_secs(3), app.navigate(Route::Zone))
        .await
        .unwrap();

    assert!(
        matches!(outcome, Navigation::Failed(CoreError::Remote { .. })),
        "got: {outcome:?}"
    );
    assert_eq!(surface.pages(), vec![Page::Zone]);
    assert_eq!(surface.errors().len(), 1);
    assert!(surface.views().is_empty());
}

#[tokio::test]
async fn zone_pages_need_a_selected_zone() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;

    let outcome = app.navigate(Route::Schedules).await;

    assert_eq!(outcome, Navigation::Failed(CoreError::NoZoneSelected));
    assert_eq!(surface.errors(), vec!["No zone selected".to_owned()]);
}

#[tokio::test]
async fn editing_an_unknown_mode_reports_not_found() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, json!([])).await;
    mount_zone_json(&server, "status", 1, status_json(70.0)).await;
    app.select_zone(ZoneId(1));

    let outcome = app.navigate(Route::EditMode(ModeId(99))).await;

    assert!(matches!(outcome, Navigation::Failed(CoreError::NotFound { entity: "mode", id: 99 })));
    assert_eq!(surface.errors(), vec!["mode 99 not found".to_owned()]);
}

#[tokio::test]
async fn edit_pages_are_prefilled() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, schedules_json(1)).await;
    mount_zone_json(&server, "status", 1, status_json(70.0)).await;
    app.select_zone(ZoneId(1));

    app.navigate(Route::EditMode(ModeId(4))).await;
    app.navigate(Route::EditSchedule(ScheduleId(11))).await;

    let views = surface.views();
    match &views[0] {
        View::ModeForm(form) => {
            assert_eq!(form.id.as_deref(), Some("4"));
            assert_eq!(form.name, "Away");
            assert_eq!(form.max_temp, "80");
        }
        other => panic!("expected mode form, got {other:?}"),
    }
    match &views[1] {
        View::ScheduleForm { form, modes } => {
            assert_eq!(form.id.as_deref(), Some("11"));
            assert_eq!(form.mode_id, "3");
            assert_eq!(form.start_time, "07:00");
            // Monday through Friday
            assert_eq!(form.weekdays, [false, true, true, true, true, true, false]);
            assert_eq!(modes.len(), 2);
        }
        other => panic!("expected schedule form, got {other:?}"),
    }
}

#[tokio::test]
async fn add_schedule_page_offers_a_blank_mode_first() {
    let (server, app, surface) = setup().await;
    mount_all_pages(&server).await;
    mount_zone_json(&server, "mode", 1, modes_json(1)).await;
    mount_zone_json(&server, "schedule", 1, json!([])).await;
    mount_zone_json(&server, "status", 1, status_json(70.0)).await;
    app.select_zone(ZoneId(1));

    assert_eq!(app.navigate(Route::AddSchedule).await, Navigation::Displayed);

    match &surface.views()[0] {
        View::ScheduleForm { form, modes } => {
            assert_eq!(modes[0].id, None);
            assert_eq!(modes[0].label, "");
            assert_eq!(modes.len(), 3);
            assert!(form.id.is_none());
            assert_eq!(form.start_date, form.end_date);
        }
        other => panic!("expected schedule form, got {other:?}"),
    }
}
