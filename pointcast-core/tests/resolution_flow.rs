//! End-to-end scenarios for the coordinate/station resolution chain, driven
//! through the store so the full dispatch path (including effect emission)
//! is exercised.

use pointcast_core::testing::{alert, forecast_with_periods, point_info, StoreHarness};
use pointcast_core::{Action, AppState, Coordinate, Effect, GridKey, PointKey};

fn lox_grid() -> GridKey {
    GridKey {
        office: "LOX".to_string(),
        grid_x: 154,
        grid_y: 44,
    }
}

#[test]
fn click_to_forecast_happy_path() {
    let mut harness = StoreHarness::default();

    // Startup state: fallback origin, nothing resolved.
    assert_eq!(harness.state().point, Coordinate::new(40.0, -100.0));
    assert_eq!(harness.state().station, None);

    harness.dispatch(Action::LatitudeSet(34.0));
    harness.dispatch(Action::LongitudeSet(-118.0));

    // Each half independently re-keyed the gridpoint fetch.
    let effects = harness.drain_effects();
    assert_eq!(
        effects,
        vec![
            Effect::FetchGridpoint {
                key: PointKey::new(34.0, -100.0)
            },
            Effect::FetchGridpoint {
                key: PointKey::new(34.0, -118.0)
            },
        ]
    );

    harness.dispatch(Action::GridpointDidLoad {
        key: PointKey::new(34.0, -118.0),
        info: point_info("LOX", 154, 44),
    });

    assert_eq!(harness.state().station.as_deref(), Some("LOX"));
    assert_eq!(
        harness.drain_effects(),
        vec![Effect::FetchForecast { key: lox_grid() }]
    );

    harness.dispatch(Action::ForecastDidLoad {
        key: lox_grid(),
        forecast: forecast_with_periods(14),
    });

    let forecast = harness.state().forecast.payload().unwrap();
    assert_eq!(forecast.periods.len(), 14);
}

#[test]
fn superseded_coordinate_never_resolves_the_station() {
    let mut harness = StoreHarness::default();

    harness.dispatch(Action::PointSet {
        lat: 34.0,
        lon: -118.0,
    });
    let stale = PointKey::new(34.0, -118.0);

    harness.dispatch(Action::PointSet {
        lat: 47.6,
        lon: -122.3,
    });
    harness.drain_effects();

    // The first request settles after the second was issued.
    let changed = harness.dispatch(Action::GridpointDidLoad {
        key: stale,
        info: point_info("LOX", 154, 44),
    });

    assert!(!changed);
    assert_eq!(harness.state().station, None);
    assert!(harness.state().gridpoint.is_loading());
    assert!(harness.drain_effects().is_empty());

    // The live request still resolves normally afterwards.
    harness.dispatch(Action::GridpointDidLoad {
        key: PointKey::new(47.6, -122.3),
        info: point_info("SEW", 124, 67),
    });
    assert_eq!(harness.state().station.as_deref(), Some("SEW"));
}

#[test]
fn manual_station_override_survives_gridpoint_success() {
    let mut harness = StoreHarness::default();

    harness.dispatch(Action::PointSet {
        lat: 34.0,
        lon: -118.0,
    });
    harness.dispatch(Action::StationSet("SGX".to_string()));
    harness.drain_effects();

    harness.dispatch(Action::GridpointDidLoad {
        key: PointKey::new(34.0, -118.0),
        info: point_info("LOX", 154, 44),
    });

    assert_eq!(harness.state().station.as_deref(), Some("SGX"));
    // The forecast routes through the override with the payload's grid cell.
    assert_eq!(
        harness.drain_effects(),
        vec![Effect::FetchForecast {
            key: GridKey {
                office: "SGX".to_string(),
                grid_x: 154,
                grid_y: 44,
            }
        }]
    );
}

#[test]
fn alerts_lifecycle_is_independent_of_the_resolution_chain() {
    let mut harness = StoreHarness::default();

    harness.dispatch(Action::PointSet {
        lat: 34.0,
        lon: -118.0,
    });
    harness.dispatch(Action::AlertsFetch);
    assert!(harness.state().alerts.is_loading());

    harness.dispatch(Action::AlertsDidError {
        area: "CA".to_string(),
        error: "request failed: connection refused".to_string(),
    });

    assert!(harness.state().alerts.error().is_some());
    assert!(harness.state().gridpoint.is_loading());
    assert_eq!(harness.state().station, None);

    // A later refresh recovers the slot.
    harness.dispatch(Action::AlertsFetch);
    harness.dispatch(Action::AlertsDidLoad {
        area: "CA".to_string(),
        alerts: vec![alert("Flood Watch", "Moderate")],
    });
    assert_eq!(harness.state().alerts.payload().unwrap().len(), 1);
}

#[test]
fn refresh_rechains_forecast_through_the_existing_station() {
    let mut harness = StoreHarness::default();

    harness.dispatch(Action::PointSet {
        lat: 34.0,
        lon: -118.0,
    });
    harness.dispatch(Action::GridpointDidLoad {
        key: PointKey::new(34.0, -118.0),
        info: point_info("LOX", 154, 44),
    });
    harness.dispatch(Action::ForecastDidLoad {
        key: lox_grid(),
        forecast: forecast_with_periods(2),
    });
    harness.drain_effects();

    harness.dispatch(Action::Refresh);
    let effects = harness.drain_effects();
    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[0], Effect::FetchGridpoint { .. }));
    assert!(matches!(effects[1], Effect::FetchAlerts { ref area } if area == "CA"));

    // Station kept; gridpoint success re-issues the forecast without
    // re-deriving the station.
    harness.dispatch(Action::GridpointDidLoad {
        key: PointKey::new(34.0, -118.0),
        info: point_info("LOX", 154, 44),
    });
    assert_eq!(harness.state().station.as_deref(), Some("LOX"));
    assert_eq!(
        harness.drain_effects(),
        vec![Effect::FetchForecast { key: lox_grid() }]
    );
}

#[test]
fn configured_alert_area_keys_the_alerts_fetch() {
    let mut harness = StoreHarness::new(AppState::new(Coordinate::new(30.3, -97.7), "TX"));

    harness.dispatch(Action::AlertsFetch);
    assert_eq!(
        harness.drain_effects(),
        vec![Effect::FetchAlerts {
            area: "TX".to_string()
        }]
    );

    // A settlement for some other area is stale and dropped.
    let changed = harness.dispatch(Action::AlertsDidLoad {
        area: "CA".to_string(),
        alerts: vec![],
    });
    assert!(!changed);
    assert!(harness.state().alerts.is_loading());
}
