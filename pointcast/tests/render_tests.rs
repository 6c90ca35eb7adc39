//! Full-dashboard render tests: drive the real reducer into a state, draw
//! into a test backend, assert on the text.

use pointcast::components::{Component, Dashboard, DashboardProps};
use pointcast::testing::RenderHarness;
use pointcast_core::testing::{alert, forecast_with_periods, point_info};
use pointcast_core::{reduce, Action, AppState, GridKey, PointKey};

fn resolved_state() -> AppState {
    let mut state = AppState::default();
    reduce(
        &mut state,
        Action::PointSet {
            lat: 34.0522,
            lon: -118.2437,
        },
    );
    reduce(
        &mut state,
        Action::GridpointDidLoad {
            key: PointKey::new(34.0522, -118.2437),
            info: point_info("LOX", 154, 44),
        },
    );
    state
}

fn render_dashboard(state: &AppState) -> String {
    let mut render = RenderHarness::new(100, 30);
    let mut dashboard = Dashboard::new();
    render.render_to_string_plain(|frame| {
        dashboard.render(frame, frame.area(), DashboardProps { state });
    })
}

#[test]
fn initial_state_shows_fallback_origin_and_hints() {
    let state = AppState::default();
    let output = render_dashboard(&state);

    assert!(output.contains("40.0000, -100.0000"), "should show origin");
    assert!(
        output.contains("station unresolved"),
        "nothing resolved yet"
    );
    assert!(output.contains("refresh"), "should show refresh hint");
    assert!(output.contains("quit"), "should show quit hint");
    assert!(
        output.contains("No alerts loaded yet"),
        "alerts slot starts idle"
    );
}

#[test]
fn in_flight_gridpoint_shows_resolution_status() {
    let mut state = AppState::default();
    reduce(
        &mut state,
        Action::PointSet {
            lat: 34.0522,
            lon: -118.2437,
        },
    );

    let output = render_dashboard(&state);
    assert!(output.contains("resolving 34.0522, -118.2437"));
    assert!(output.contains("Waiting for the grid cell"));
}

#[test]
fn resolved_station_appears_in_the_header() {
    let state = resolved_state();
    let output = render_dashboard(&state);

    assert!(output.contains("34.0522, -118.2437"));
    assert!(output.contains("LOX"));
    assert!(output.contains("grid 154,44"));
    assert!(output.contains("near Los Angeles, CA"));
}

#[test]
fn forecast_cards_render_after_the_chain_completes() {
    let mut state = resolved_state();
    reduce(
        &mut state,
        Action::ForecastDidLoad {
            key: GridKey {
                office: "LOX".to_string(),
                grid_x: 154,
                grid_y: 44,
            },
            forecast: forecast_with_periods(4),
        },
    );

    let output = render_dashboard(&state);
    assert!(output.contains("Period 1"));
    assert!(output.contains("60°F"));
    assert!(output.contains("Sunny"));
}

#[test]
fn alerts_panel_renders_alongside_a_failed_forecast() {
    let mut state = resolved_state();
    reduce(
        &mut state,
        Action::ForecastDidError {
            key: GridKey {
                office: "LOX".to_string(),
                grid_x: 154,
                grid_y: 44,
            },
            error: "request failed: connection reset".to_string(),
        },
    );
    reduce(&mut state, Action::AlertsFetch);
    reduce(
        &mut state,
        Action::AlertsDidLoad {
            area: "CA".to_string(),
            alerts: vec![alert("Red Flag Warning", "Severe")],
        },
    );

    let output = render_dashboard(&state);
    // The forecast failure stays in its panel...
    assert!(output.contains("request failed: connection reset"));
    // ...while alerts render independently.
    assert!(output.contains("Red Flag Warning"));
    assert!(output.contains("[Severe]"));
}

#[test]
fn coordinate_form_overlays_the_dashboard() {
    let mut state = AppState::default();
    reduce(&mut state, Action::EntryOpen);

    let output = render_dashboard(&state);
    assert!(output.contains("Set coordinate"));
    assert!(output.contains("Latitude"));
    assert!(output.contains("Longitude"));
    assert!(output.contains("Enter apply"));
}

#[test]
fn invalid_entry_is_flagged_in_the_form() {
    let mut state = AppState::default();
    reduce(&mut state, Action::EntryOpen);
    reduce(&mut state, Action::EntryInput("not-a-number".to_string()));
    reduce(&mut state, Action::EntrySubmit);

    let output = render_dashboard(&state);
    assert!(output.contains("invalid coordinate"));
}
