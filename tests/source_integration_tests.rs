use std::time::Duration;

use holocron::core::action::{Action, Effect, update};
use holocron::core::config::{DisclosureMode, Layout, ReconnectPolicy, ScreenSpec};
use holocron::core::navigation::{Route, StackNavigator};
use holocron::core::record::default_display_keys;
use holocron::core::state::App;
use holocron::remote::connectivity::probe;
use holocron::remote::{
    ConnectivityMonitor, HttpSource, ProbeMonitor, RecordSource, SourceError,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn planets_page() -> serde_json::Value {
    json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "name": "Tatooine",
                "climate": "arid",
                "population": "200000",
                "residents": ["https://swapi.dev/api/people/1/"]
            },
            {
                "name": "Alderaan",
                "climate": "temperate",
                "population": "2000000000",
                "residents": []
            }
        ]
    })
}

fn source() -> HttpSource {
    HttpSource::new(Duration::from_secs(5))
}

/// App with a single screen pointed at the mock server.
fn app_for(server: &MockServer, disclosure: DisclosureMode) -> App {
    let spec = ScreenSpec {
        title: "Planets".to_string(),
        url: format!("{}/planets/", server.uri()),
        display_keys: default_display_keys(),
        disclosure,
        connectivity_gate: true,
        unmount_on_blur: false,
    };
    App::new(
        vec![spec],
        0,
        ReconnectPolicy::IfEmpty,
        Layout::Tabs,
        Box::new(StackNavigator::new(0)),
    )
}

/// Run the fetch `update()` asks for and feed the result back in.
async fn activate_and_load(app: &mut App, source: &HttpSource) {
    let effects = update(app, Action::Activate);
    let Some(Effect::SpawnFetch(ticket)) = effects.into_iter().next() else {
        panic!("activation should request a fetch");
    };
    let action = match source.fetch(&ticket.url).await {
        Ok(page) => Action::FetchSucceeded {
            screen: ticket.screen,
            epoch: ticket.epoch,
            records: page.results,
        },
        Err(error) => Action::FetchFailed {
            screen: ticket.screen,
            epoch: ticket.epoch,
            error,
        },
    };
    update(app, action);
}

// ============================================================================
// HttpSource Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_page_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(planets_page()))
        .mount(&mock_server)
        .await;

    let result = source()
        .fetch(&format!("{}/planets/", mock_server.uri()))
        .await;
    let page = assert_ok!(result);
    assert_eq!(page.count, Some(2));
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0]["name"], "Tatooine");
}

#[tokio::test]
async fn test_fetch_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = source()
        .fetch(&format!("{}/planets/", mock_server.uri()))
        .await;
    let error = assert_err!(result);
    match error {
        SourceError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": [oops"))
        .mount(&mock_server)
        .await;

    let result = source()
        .fetch(&format!("{}/planets/", mock_server.uri()))
        .await;
    assert!(matches!(assert_err!(result), SourceError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let result = source().fetch("http://127.0.0.1:1/planets/").await;
    assert!(matches!(assert_err!(result), SourceError::Network(_)));
}

// ============================================================================
// End-to-end through update()
// ============================================================================

#[tokio::test]
async fn test_loaded_list_filters_by_search() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(planets_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, DisclosureMode::Modal);
    activate_and_load(&mut app, &source()).await;
    assert_eq!(app.status_message, "Loaded 2 Planets");

    for c in "TAT".chars() {
        update(&mut app, Action::SearchInput(c));
    }
    let screen = app.active_screen().unwrap();
    let names: Vec<&str> = screen
        .visible()
        .iter()
        .map(|row| row.record.display.as_str())
        .collect();
    assert_eq!(names, vec!["Tatooine"]);
    assert_eq!(screen.state.items.len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_leaves_list_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, DisclosureMode::Modal);
    activate_and_load(&mut app, &source()).await;

    let screen = app.active_screen().unwrap();
    assert!(screen.state.items.is_empty());
    assert!(!screen.is_loading());
    assert!(screen.visible().is_empty());
}

#[tokio::test]
async fn test_navigate_shows_only_string_fields() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(planets_page()))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server, DisclosureMode::Navigate);
    activate_and_load(&mut app, &source()).await;
    update(&mut app, Action::Open { item_index: 0 });

    let Route::Detail { record, .. } = app.navigator.current() else {
        panic!("expected a detail route");
    };
    assert_eq!(record.display, "Tatooine");
    assert_eq!(record.field("population"), Some("200000"));
    assert_eq!(record.field("residents"), None);
}

// ============================================================================
// Connectivity Tests
// ============================================================================

#[tokio::test]
async fn test_probe_reachable_server() {
    let mock_server = MockServer::start().await;
    // Any response counts, even the default 404
    assert!(probe(&reqwest::Client::new(), &mock_server.uri()).await);
}

#[tokio::test]
async fn test_probe_unreachable() {
    assert!(!probe(&reqwest::Client::new(), "http://127.0.0.1:1/").await);
}

#[tokio::test]
async fn test_probe_monitor_reports_offline() {
    let monitor = ProbeMonitor::spawn("http://127.0.0.1:1/".to_string(), Duration::from_secs(1));
    let mut subscription = monitor.subscribe();
    assert!(subscription.is_connected());

    let change = tokio::time::timeout(Duration::from_secs(5), subscription.changed()).await;
    assert_eq!(assert_ok!(change), Some(false));
    assert!(!monitor.is_connected());
}
