//! Effects - side effects declared by the reducer.
//!
//! Effects are descriptions of work, not the work itself: the reducer stays
//! pure and the runtime's effect handler turns each one into a keyed async
//! task. Every effect carries the request key its settlement must echo back.

use crate::request::{GridKey, PointKey};

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Resolve a coordinate to its grid cell and owning office.
    FetchGridpoint { key: PointKey },
    /// Fetch the multi-period forecast for a resolved grid cell.
    FetchForecast { key: GridKey },
    /// Fetch the active alerts for an area code.
    FetchAlerts { area: String },
}
