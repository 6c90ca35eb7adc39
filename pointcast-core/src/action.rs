//! Actions - every way the application state can change.
//!
//! One closed enum, matched exhaustively by the reducer. Naming follows the
//! intent/result convention: plain verbs are user or timer intents, `Did*`
//! variants carry an async fetch result back onto the main loop. Result
//! variants always carry the key their request was issued for so the reducer
//! can drop settlements that belong to a superseded key.

use crate::api::{Alert, Forecast, PointInfo};
use crate::request::{GridKey, PointKey};
use crate::state::CoordinateField;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Coordinate/station machine =====
    /// Set latitude; clears the resolved station.
    LatitudeSet(f64),
    /// Set longitude; clears the resolved station.
    LongitudeSet(f64),
    /// Set both halves in one transition (map-click analog); clears the
    /// resolved station once instead of twice.
    PointSet { lat: f64, lon: f64 },
    /// Offset the coordinate by (dlat, dlon), e.g. an arrow-key nudge.
    PointNudge { dlat: f64, dlon: f64 },
    /// Set the resolved station; the coordinate is untouched.
    StationSet(String),

    // ===== Fetch results =====
    GridpointDidLoad { key: PointKey, info: PointInfo },
    GridpointDidError { key: PointKey, error: String },
    ForecastDidLoad { key: GridKey, forecast: Forecast },
    ForecastDidError { key: GridKey, error: String },
    AlertsDidLoad { area: String, alerts: Vec<Alert> },
    AlertsDidError { area: String, error: String },

    // ===== Fetch intents =====
    /// Re-issue the gridpoint and alerts fetches for the current keys. The
    /// forecast refresh chains off the gridpoint result.
    Refresh,
    /// Re-issue only the alerts fetch (auto-refresh interval).
    AlertsFetch,

    // ===== Coordinate form =====
    EntryOpen,
    EntryInput(String),
    EntryFocus(CoordinateField),
    EntrySubmit,
    EntryCancel,

    // ===== UI =====
    PeriodNext,
    PeriodPrev,
    /// Periodic tick for the loading animation.
    Tick,
    /// Exit the application (handled by the runtime, not the reducer).
    Quit,
}

impl Action {
    /// Stable name for logging and filtering.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LatitudeSet(_) => "LatitudeSet",
            Action::LongitudeSet(_) => "LongitudeSet",
            Action::PointSet { .. } => "PointSet",
            Action::PointNudge { .. } => "PointNudge",
            Action::StationSet(_) => "StationSet",
            Action::GridpointDidLoad { .. } => "GridpointDidLoad",
            Action::GridpointDidError { .. } => "GridpointDidError",
            Action::ForecastDidLoad { .. } => "ForecastDidLoad",
            Action::ForecastDidError { .. } => "ForecastDidError",
            Action::AlertsDidLoad { .. } => "AlertsDidLoad",
            Action::AlertsDidError { .. } => "AlertsDidError",
            Action::Refresh => "Refresh",
            Action::AlertsFetch => "AlertsFetch",
            Action::EntryOpen => "EntryOpen",
            Action::EntryInput(_) => "EntryInput",
            Action::EntryFocus(_) => "EntryFocus",
            Action::EntrySubmit => "EntrySubmit",
            Action::EntryCancel => "EntryCancel",
            Action::PeriodNext => "PeriodNext",
            Action::PeriodPrev => "PeriodPrev",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Concise rendering for the action log; payload-heavy results are
    /// summarized instead of dumped.
    pub fn summary(&self) -> String {
        match self {
            Action::GridpointDidLoad { key, info } => {
                format!("GridpointDidLoad {{ key: {}, office: {} }}", key, info.office)
            }
            Action::ForecastDidLoad { key, forecast } => format!(
                "ForecastDidLoad {{ key: {}, periods: {} }}",
                key,
                forecast.periods.len()
            ),
            Action::AlertsDidLoad { area, alerts } => {
                format!("AlertsDidLoad {{ area: {}, alerts: {} }}", area, alerts.len())
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::point_info;

    #[test]
    fn summary_compresses_payload_heavy_results() {
        let action = Action::GridpointDidLoad {
            key: PointKey::new(34.0522, -118.2437),
            info: point_info("LOX", 154, 44),
        };
        assert_eq!(
            action.summary(),
            "GridpointDidLoad { key: 34.0522,-118.2437, office: LOX }"
        );
    }

    #[test]
    fn summary_falls_back_to_debug_for_simple_actions() {
        assert_eq!(Action::Refresh.summary(), "Refresh");
        assert_eq!(Action::LatitudeSet(34.0).summary(), "LatitudeSet(34.0)");
    }
}
