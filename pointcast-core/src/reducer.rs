//! Reducer - pure function: (state, action) -> DispatchResult.
//!
//! All state transitions happen here, in one exhaustive match over the closed
//! [`Action`] enum. No async, no I/O: side effects are declared as [`Effect`]
//! values for the runtime to execute.
//!
//! Two rules the match enforces throughout:
//!
//! - A latitude/longitude change clears the resolved station and re-keys the
//!   gridpoint fetch; the forecast slot goes back to idle until a new grid
//!   key can be derived.
//! - Fetch settlements carry the key their request was issued for. A
//!   settlement whose key no longer matches the slot's in-flight key is
//!   dropped on the floor (last-key-wins).

use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Coordinate, CoordinateEntry};
use crate::store::DispatchResult;

pub fn reduce(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        // ===== Coordinate/station machine =====
        Action::LatitudeSet(lat) => set_point(state, Coordinate::new(lat, state.point.lon)),
        Action::LongitudeSet(lon) => set_point(state, Coordinate::new(state.point.lat, lon)),
        Action::PointSet { lat, lon } => set_point(state, Coordinate::new(lat, lon)),
        Action::PointNudge { dlat, dlon } => set_point(state, state.point.nudged(dlat, dlon)),

        Action::StationSet(station) => {
            state.station = Some(station);
            begin_forecast(state)
        }

        // ===== Gridpoint settlement =====
        Action::GridpointDidLoad { key, info } => {
            let office = info.office.clone();
            if !state.gridpoint.settle_ok(key, info) {
                debug!(%key, "stale gridpoint response dropped");
                return DispatchResult::unchanged();
            }
            // One-shot station fill-in: only when nothing has resolved or
            // overridden it for this coordinate. A set station always wins.
            if state.station.is_none() {
                state.station = Some(office);
            }
            begin_forecast(state)
        }

        Action::GridpointDidError { key, error } => {
            if !state.gridpoint.settle_err(key, error) {
                debug!(%key, "stale gridpoint error dropped");
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Forecast settlement =====
        Action::ForecastDidLoad { key, forecast } => {
            let periods = forecast.periods.len();
            if !state.forecast.settle_ok(key, forecast) {
                debug!("stale forecast response dropped");
                return DispatchResult::unchanged();
            }
            state.selected_period = state.selected_period.min(periods.saturating_sub(1));
            DispatchResult::changed()
        }

        Action::ForecastDidError { key, error } => {
            if !state.forecast.settle_err(key, error) {
                debug!("stale forecast error dropped");
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Alerts settlement =====
        Action::AlertsDidLoad { area, alerts } => {
            if !state.alerts.settle_ok(area, alerts) {
                debug!("stale alerts response dropped");
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::AlertsDidError { area, error } => {
            if !state.alerts.settle_err(area, error) {
                debug!("stale alerts error dropped");
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Fetch intents =====
        Action::Refresh => {
            let key = state.point.key();
            state.gridpoint.begin(key);
            // The forecast refresh chains off the gridpoint settlement; the
            // resolved station survives a refresh (only coordinate changes
            // invalidate it).
            state.forecast.reset();
            let area = state.alert_area.clone();
            state.alerts.begin(area.clone());
            DispatchResult::changed_with_many(vec![
                Effect::FetchGridpoint { key },
                Effect::FetchAlerts { area },
            ])
        }

        Action::AlertsFetch => {
            let area = state.alert_area.clone();
            state.alerts.begin(area.clone());
            DispatchResult::changed_with(Effect::FetchAlerts { area })
        }

        // ===== Coordinate form =====
        Action::EntryOpen => {
            state.entry = Some(CoordinateEntry::from_point(state.point));
            DispatchResult::changed()
        }

        Action::EntryInput(value) => match state.entry.as_mut() {
            Some(entry) => {
                entry.set_active(value);
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::EntryFocus(field) => match state.entry.as_mut() {
            Some(entry) => {
                entry.field = field;
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::EntrySubmit => {
            let Some(entry) = state.entry.as_mut() else {
                return DispatchResult::unchanged();
            };
            match entry.parse() {
                Some((lat, lon)) => {
                    state.entry = None;
                    set_point(state, Coordinate::new(lat, lon))
                }
                None => {
                    entry.invalid = true;
                    DispatchResult::changed()
                }
            }
        }

        Action::EntryCancel => {
            state.entry = None;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::PeriodNext => {
            let count = state
                .forecast
                .payload()
                .map(|forecast| forecast.periods.len())
                .unwrap_or(0);
            if state.selected_period + 1 < count {
                state.selected_period += 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PeriodPrev => {
            if state.selected_period > 0 {
                state.selected_period -= 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only re-render while a spinner is actually animating.
            if state.is_fetching() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => {
            // Quit is handled by the runtime, not here.
            DispatchResult::unchanged()
        }
    }
}

/// Apply a coordinate change: clear the station, re-key the gridpoint fetch,
/// withhold the forecast until a new grid key exists.
fn set_point(state: &mut AppState, point: Coordinate) -> DispatchResult {
    state.point = point;
    // Station validity is scoped to the coordinate that produced it.
    state.station = None;
    state.forecast.reset();
    state.selected_period = 0;
    let key = point.key();
    state.gridpoint.begin(key);
    DispatchResult::changed_with(Effect::FetchGridpoint { key })
}

/// Issue the forecast fetch once (station, grid cell) are both known, unless
/// the slot is already keyed to that exact cell.
fn begin_forecast(state: &mut AppState) -> DispatchResult {
    match state.grid_key() {
        Some(key) if state.forecast.key() != Some(&key) => {
            state.forecast.begin(key.clone());
            DispatchResult::changed_with(Effect::FetchForecast { key })
        }
        _ => DispatchResult::changed(),
    }
}
