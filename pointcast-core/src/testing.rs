//! Test utilities: payload fixtures and a store harness that records the
//! effects each dispatch emits. Used by the unit tests here and by the app
//! crate's render tests.

use crate::action::Action;
use crate::api::{Alert, Forecast, ForecastPeriod, PointInfo};
use crate::effect::Effect;
use crate::state::AppState;
use crate::store::Store;

/// A gridpoint payload for the given office and grid cell.
pub fn point_info(office: &str, grid_x: i32, grid_y: i32) -> PointInfo {
    PointInfo {
        office: office.to_string(),
        grid_id: office.to_string(),
        grid_x,
        grid_y,
        locality: Some("Los Angeles, CA".to_string()),
    }
}

/// A forecast period with plausible defaults.
pub fn period(name: &str, temperature: i64, short_forecast: &str) -> ForecastPeriod {
    ForecastPeriod {
        name: name.to_string(),
        start_time: "2024-05-01T06:00:00-07:00".to_string(),
        is_daytime: true,
        temperature,
        temperature_unit: "F".to_string(),
        wind_speed: "5 to 10 mph".to_string(),
        wind_direction: "SW".to_string(),
        precipitation: None,
        short_forecast: short_forecast.to_string(),
        detailed_forecast: format!("{}, with a high near {}.", short_forecast, temperature),
    }
}

/// A forecast holding `count` generic periods.
pub fn forecast_with_periods(count: usize) -> Forecast {
    Forecast {
        updated: Some("2024-05-01T10:00:00+00:00".to_string()),
        periods: (0..count)
            .map(|i| period(&format!("Period {}", i + 1), 60 + i as i64, "Sunny"))
            .collect(),
    }
}

/// An alert with the given event and severity.
pub fn alert(event: &str, severity: &str) -> Alert {
    Alert {
        event: event.to_string(),
        severity: severity.to_string(),
        headline: Some(format!("{} issued for the area", event)),
        area_desc: "Los Angeles County".to_string(),
        onset: None,
        ends: None,
    }
}

/// Wraps a [`Store`] and accumulates every effect emitted across dispatches,
/// so scenario tests can assert on the whole effect trail.
pub struct StoreHarness {
    store: Store,
    effects: Vec<Effect>,
}

impl StoreHarness {
    pub fn new(state: AppState) -> Self {
        Self {
            store: Store::new(state),
            effects: Vec::new(),
        }
    }

    /// Dispatch an action, recording its effects. Returns whether the state
    /// changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        self.effects.extend(result.effects);
        result.changed
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Take every effect recorded since the last drain.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl Default for StoreHarness {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
