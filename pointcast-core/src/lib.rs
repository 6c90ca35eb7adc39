//! Core domain logic for pointcast: the coordinate/station resolution state
//! machine and the api.weather.gov data fetcher, with no terminal
//! dependencies.
//!
//! # Architecture
//!
//! State management follows a Redux/Elm-inspired loop:
//!
//! - [`Action`]: a closed enum of every state transition, including the
//!   settle results of async fetches
//! - [`reduce`]: pure reducer `(state, action) -> DispatchResult`, the only
//!   place state mutates
//! - [`Effect`]: declarative fetch descriptions the reducer emits; the
//!   runtime executes them via [`tasks::TaskManager`]
//! - [`RequestState`]: per-endpoint request lifecycle keyed by semantic
//!   parameters, with a last-key-wins guard against stale settlements
//!
//! # The resolution chain
//!
//! A coordinate change re-keys the gridpoint fetch and clears the resolved
//! station. When the gridpoint response lands for the current key and no
//! station is set, the reducer fills the station in from the payload's office
//! identifier and issues the forecast fetch for (station, gridX, gridY) in
//! the same dispatch. Alerts are independent and keyed only by an area code.
//!
//! ```
//! use pointcast_core::{reduce, Action, AppState, Effect};
//!
//! let mut state = AppState::default();
//! let result = reduce(&mut state, Action::PointSet { lat: 34.0522, lon: -118.2437 });
//! assert!(matches!(result.effects[0], Effect::FetchGridpoint { .. }));
//! assert_eq!(state.station, None);
//! ```

pub mod action;
pub mod api;
pub mod effect;
pub mod reducer;
pub mod request;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use api::{geocode_place, Alert, FetchError, Forecast, ForecastPeriod, NwsClient, PointInfo};
pub use effect::Effect;
pub use reducer::reduce;
pub use request::{GridKey, PointKey, RequestState};
pub use state::{
    AppState, Coordinate, CoordinateEntry, CoordinateField, DEFAULT_ALERT_AREA, FALLBACK_ORIGIN,
    LOADING_ANIM_TICK_MS, NUDGE_STEP,
};
pub use store::{DispatchResult, Store};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};
