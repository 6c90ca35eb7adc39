//! Request lifecycle tracking for the three weather.gov fetches.
//!
//! Each fetch slot is a [`RequestState`] keyed by the semantic parameters of
//! the request. A slot re-enters `InFlight` with a fresh key whenever its
//! parameters change, and a settlement only lands if it carries the key the
//! slot is currently waiting for. Responses for superseded keys are dropped
//! (last-key-wins), so a slow fetch can never overwrite state that belongs to
//! a newer request.

use std::fmt;

/// Coordinate key for the `/points/{lat},{lon}` lookup.
///
/// api.weather.gov resolves coordinates at four decimal places, so keys are
/// quantized to 1e-4 degrees. Quantizing also gives the key exact equality,
/// which the stale-response guard relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointKey {
    lat_e4: i32,
    lon_e4: i32,
}

impl PointKey {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat_e4: (lat * 1e4).round() as i32,
            lon_e4: (lon * 1e4).round() as i32,
        }
    }

    pub fn lat(&self) -> f64 {
        f64::from(self.lat_e4) / 1e4
    }

    pub fn lon(&self) -> f64 {
        f64::from(self.lon_e4) / 1e4
    }
}

impl fmt::Display for PointKey {
    /// Formats as the path segment the points endpoint expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat(), self.lon())
    }
}

/// Grid cell key for the `/gridpoints/{office}/{x},{y}/forecast` lookup.
///
/// The office comes from the state machine's resolved station, the indices
/// from the gridpoint payload, so a key can only exist once both are known.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridKey {
    pub office: String,
    pub grid_x: i32,
    pub grid_y: i32,
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{},{}", self.office, self.grid_x, self.grid_y)
    }
}

/// Snapshot of one asynchronous fetch: not yet requested, in flight, settled
/// with a payload, or settled with an error. `K` is the request key, `T` the
/// decoded payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestState<K, T> {
    /// Key parameters are absent or invalid; nothing has been requested.
    Idle,
    InFlight {
        key: K,
    },
    Ready {
        key: K,
        payload: T,
    },
    Failed {
        key: K,
        error: String,
    },
}

impl<K, T> Default for RequestState<K, T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<K: PartialEq, T> RequestState<K, T> {
    /// Start a fresh request for `key`, discarding whatever the slot held.
    pub fn begin(&mut self, key: K) {
        *self = RequestState::InFlight { key };
    }

    /// Return the slot to `Idle` (key parameters no longer valid).
    pub fn reset(&mut self) {
        *self = RequestState::Idle;
    }

    /// Land a successful settlement. Returns `false` and leaves the slot
    /// untouched when `key` is not the key currently in flight.
    pub fn settle_ok(&mut self, key: K, payload: T) -> bool {
        if self.in_flight_key() != Some(&key) {
            return false;
        }
        *self = RequestState::Ready { key, payload };
        true
    }

    /// Land a failed settlement, with the same stale-key guard as
    /// [`settle_ok`](Self::settle_ok).
    pub fn settle_err(&mut self, key: K, error: String) -> bool {
        if self.in_flight_key() != Some(&key) {
            return false;
        }
        *self = RequestState::Failed { key, error };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }

    /// The key of the current request, whatever state it is in.
    pub fn key(&self) -> Option<&K> {
        match self {
            RequestState::Idle => None,
            RequestState::InFlight { key }
            | RequestState::Ready { key, .. }
            | RequestState::Failed { key, .. } => Some(key),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            RequestState::Ready { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn in_flight_key(&self) -> Option<&K> {
        match self {
            RequestState::InFlight { key } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_key_quantizes_to_four_decimals() {
        let key = PointKey::new(34.05219999, -118.24370001);
        assert_eq!(key, PointKey::new(34.0522, -118.2437));
        assert_eq!(key.to_string(), "34.0522,-118.2437");
    }

    #[test]
    fn settle_requires_matching_in_flight_key() {
        let mut slot: RequestState<PointKey, &str> = RequestState::Idle;
        let old = PointKey::new(40.0, -100.0);
        let new = PointKey::new(34.0, -118.0);

        // Nothing in flight: any settlement is stale.
        assert!(!slot.settle_ok(old, "payload"));
        assert_eq!(slot, RequestState::Idle);

        slot.begin(old);
        slot.begin(new);

        // The superseded key must not land.
        assert!(!slot.settle_ok(old, "old payload"));
        assert!(slot.is_loading());

        assert!(slot.settle_ok(new, "new payload"));
        assert_eq!(slot.payload(), Some(&"new payload"));
    }

    #[test]
    fn failure_is_guarded_by_the_same_key_check() {
        let mut slot: RequestState<String, ()> = RequestState::Idle;
        slot.begin("CA".to_string());

        assert!(!slot.settle_err("TX".to_string(), "boom".to_string()));
        assert!(slot.is_loading());

        assert!(slot.settle_err("CA".to_string(), "boom".to_string()));
        assert_eq!(slot.error(), Some("boom"));
        assert_eq!(slot.payload(), None);
    }

    #[test]
    fn ready_slot_ignores_late_duplicate_settlement() {
        let mut slot: RequestState<PointKey, u32> = RequestState::Idle;
        let key = PointKey::new(34.0, -118.0);
        slot.begin(key);
        assert!(slot.settle_ok(key, 1));
        assert!(!slot.settle_ok(key, 2));
        assert_eq!(slot.payload(), Some(&1));
    }

    #[test]
    fn reset_clears_key_and_payload() {
        let mut slot: RequestState<PointKey, u32> = RequestState::Idle;
        let key = PointKey::new(34.0, -118.0);
        slot.begin(key);
        slot.settle_ok(key, 7);
        slot.reset();
        assert_eq!(slot.key(), None);
        assert_eq!(slot.payload(), None);
    }
}
