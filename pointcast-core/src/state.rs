//! Application state - single source of truth.
//!
//! Components receive `&AppState` as props; only the reducer mutates it. The
//! heart of the state is the (coordinate, station) pair plus one request slot
//! per endpoint. The invariant the reducer enforces everywhere: a resolved
//! station is only valid for the coordinate that produced it, so any
//! latitude/longitude change clears it (and with it the forecast).

use std::fmt;

use crate::api::{Alert, Forecast, PointInfo};
use crate::request::{GridKey, PointKey, RequestState};

/// Continental-US fallback used when nothing else supplies a coordinate.
pub const FALLBACK_ORIGIN: Coordinate = Coordinate {
    lat: 40.0,
    lon: -100.0,
};

/// Area code scoping the alerts query unless reconfigured at startup.
pub const DEFAULT_ALERT_AREA: &str = "CA";

/// Degrees moved per arrow-key nudge.
pub const NUDGE_STEP: f64 = 0.1;

/// Tick cadence driving the loading spinner.
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// A geographic coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The request key this coordinate produces for the points endpoint.
    pub fn key(&self) -> PointKey {
        PointKey::new(self.lat, self.lon)
    }

    /// Offset by (dlat, dlon), clamped to valid latitude/longitude ranges.
    pub fn nudged(&self, dlat: f64, dlon: f64) -> Self {
        Self {
            lat: (self.lat + dlat).clamp(-90.0, 90.0),
            lon: (self.lon + dlon).clamp(-180.0, 180.0),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Which half of the coordinate form currently has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl CoordinateField {
    pub fn next(self) -> Self {
        match self {
            CoordinateField::Latitude => CoordinateField::Longitude,
            CoordinateField::Longitude => CoordinateField::Latitude,
        }
    }
}

/// In-progress coordinate form entry. Exists only while the form is open;
/// committing it collapses into a single combined point update.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateEntry {
    pub field: CoordinateField,
    pub lat: String,
    pub lon: String,
    /// Set when the last submit failed to parse; cleared on edit.
    pub invalid: bool,
}

impl CoordinateEntry {
    /// Seed the form from the current coordinate.
    pub fn from_point(point: Coordinate) -> Self {
        Self {
            field: CoordinateField::Latitude,
            lat: format!("{:.4}", point.lat),
            lon: format!("{:.4}", point.lon),
            invalid: false,
        }
    }

    /// The buffer of the focused field.
    pub fn active(&self) -> &str {
        match self.field {
            CoordinateField::Latitude => &self.lat,
            CoordinateField::Longitude => &self.lon,
        }
    }

    /// Replace the buffer of the focused field.
    pub fn set_active(&mut self, value: String) {
        match self.field {
            CoordinateField::Latitude => self.lat = value,
            CoordinateField::Longitude => self.lon = value,
        }
        self.invalid = false;
    }

    /// Parse both fields into an in-range (lat, lon) pair.
    pub fn parse(&self) -> Option<(f64, f64)> {
        let lat: f64 = self.lat.trim().parse().ok()?;
        let lon: f64 = self.lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some((lat, lon))
    }
}

/// Application state - everything the UI needs to render.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Current coordinate; the authoritative half of the (point, station) pair.
    pub point: Coordinate,

    /// Resolved forecast office for `point`, or `None` until the gridpoint
    /// lookup (or an explicit override) supplies one.
    pub station: Option<String>,

    /// Area code for the alerts query. Fixed after startup.
    pub alert_area: String,

    /// `/points/{lat},{lon}` — keyed by the coordinate.
    pub gridpoint: RequestState<PointKey, PointInfo>,

    /// `/gridpoints/{office}/{x},{y}/forecast` — keyed by (station, grid cell).
    pub forecast: RequestState<GridKey, Forecast>,

    /// `/alerts?area=..&active=true` — keyed by the area code.
    pub alerts: RequestState<String, Vec<Alert>>,

    /// Open coordinate form, if any.
    pub entry: Option<CoordinateEntry>,

    /// Index of the highlighted forecast period.
    pub selected_period: usize,

    /// Animation frame counter for the loading spinner.
    pub tick_count: u32,
}

impl AppState {
    pub fn new(origin: Coordinate, alert_area: impl Into<String>) -> Self {
        Self {
            point: origin,
            station: None,
            alert_area: alert_area.into(),
            gridpoint: RequestState::Idle,
            forecast: RequestState::Idle,
            alerts: RequestState::Idle,
            entry: None,
            selected_period: 0,
            tick_count: 0,
        }
    }

    /// The forecast request key, derivable only once a station is resolved
    /// and the gridpoint payload supplies the grid cell indices. While this
    /// returns `None` the forecast fetch is withheld.
    pub fn grid_key(&self) -> Option<GridKey> {
        let office = self.station.clone()?;
        let info = self.gridpoint.payload()?;
        Some(GridKey {
            office,
            grid_x: info.grid_x,
            grid_y: info.grid_y,
        })
    }

    /// Whether any of the three fetches is in flight.
    pub fn is_fetching(&self) -> bool {
        self.gridpoint.is_loading() || self.forecast.is_loading() || self.alerts.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FALLBACK_ORIGIN, DEFAULT_ALERT_AREA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_clamps_to_valid_ranges() {
        let top = Coordinate::new(89.95, 179.95);
        let nudged = top.nudged(NUDGE_STEP, NUDGE_STEP);
        assert_eq!(nudged, Coordinate::new(90.0, 180.0));
    }

    #[test]
    fn entry_parse_rejects_out_of_range_values() {
        let mut entry = CoordinateEntry::from_point(FALLBACK_ORIGIN);
        entry.lat = "91.0".to_string();
        assert_eq!(entry.parse(), None);

        entry.lat = "34.0522".to_string();
        entry.lon = "-118.2437".to_string();
        assert_eq!(entry.parse(), Some((34.0522, -118.2437)));
    }

    #[test]
    fn entry_parse_rejects_garbage() {
        let mut entry = CoordinateEntry::from_point(FALLBACK_ORIGIN);
        entry.lon = "westish".to_string();
        assert_eq!(entry.parse(), None);
    }

    #[test]
    fn grid_key_requires_station_and_gridpoint_payload() {
        let mut state = AppState::default();
        assert_eq!(state.grid_key(), None);

        let key = state.point.key();
        state.gridpoint.begin(key);
        state.gridpoint.settle_ok(
            key,
            PointInfo {
                office: "LOX".to_string(),
                grid_id: "LOX".to_string(),
                grid_x: 154,
                grid_y: 44,
                locality: None,
            },
        );
        // Payload present but station still unresolved.
        assert_eq!(state.grid_key(), None);

        state.station = Some("LOX".to_string());
        let grid = state.grid_key().unwrap();
        assert_eq!(grid.to_string(), "LOX/154,44");
    }
}
