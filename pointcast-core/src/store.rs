//! Centralized state store with an effect-emitting reducer.
//!
//! The store holds the application state and provides the single point for
//! state mutations through [`Store::dispatch`]. The reducer returns a
//! [`DispatchResult`]: whether the state changed (the runtime re-renders) and
//! any effects the runtime must process.

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reduce;
use crate::state::AppState;

/// Result of dispatching one action.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<Effect>,
}

impl Default for DispatchResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl DispatchResult {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// State changed with multiple effects.
    #[inline]
    pub fn changed_with_many(effects: Vec<Effect>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// The state container. All mutations flow through [`dispatch`](Self::dispatch),
/// which also logs each action through `tracing`.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a mutable reference to the state.
    ///
    /// Use sparingly - prefer dispatching actions for state changes. This is
    /// mainly useful for initialization.
    #[inline]
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::debug!(action = %action.summary(), "dispatch");
        let result = reduce(&mut self.state, action);
        tracing::trace!(
            changed = result.changed,
            effects = result.effects.len(),
            "dispatched"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PointKey;

    #[test]
    fn dispatch_result_builders() {
        let result = DispatchResult::unchanged();
        assert!(!result.changed);
        assert!(!result.has_effects());

        let result = DispatchResult::changed();
        assert!(result.changed);
        assert!(result.effects.is_empty());

        let key = PointKey::new(40.0, -100.0);
        let result = DispatchResult::changed_with(Effect::FetchGridpoint { key });
        assert!(result.changed);
        assert_eq!(result.effects, vec![Effect::FetchGridpoint { key }]);

        let result = DispatchResult::unchanged().with(Effect::FetchAlerts {
            area: "CA".to_string(),
        });
        assert!(result.has_effects());
    }

    #[test]
    fn store_routes_actions_through_the_reducer() {
        let mut store = Store::new(AppState::default());
        let result = store.dispatch(Action::LatitudeSet(34.0));
        assert!(result.changed);
        assert_eq!(store.state().point.lat, 34.0);
    }
}
