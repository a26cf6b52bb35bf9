//! Hooks into [Store::dispatch()], run in the order the middleware
//! was added with [Store::add_middleware()].

pub mod simple_logger;

use crate::Store;

/// Extends a [Store] around each dispatched `Action`. Every hook has
/// a pass-through default, so implementors only override what they
/// need.
pub trait Middleware<State, Action, Event, Effect> {
    /// Runs before the `Action` reaches the [Reducer](crate::Reducer),
    /// receiving the action returned by the previous middleware.
    /// Returning a different action replaces it; returning `None`
    /// drops it, and the state is left unchanged.
    fn before_reduce(
        &self,
        _store: &Store<State, Action, Event, Effect>,
        action: Action,
    ) -> Option<Action> {
        Some(action)
    }

    /// Runs once the store holds the state produced for `action`.
    fn after_reduce(&self, _store: &Store<State, Action, Event, Effect>, _action: &Action) {}

    /// Handles an `Effect` produced by the reducer. Returns `None`
    /// when the effect was consumed, otherwise passes it on to the
    /// next middleware.
    fn process_effect(
        &self,
        _store: &Store<State, Action, Event, Effect>,
        effect: Effect,
    ) -> Option<Effect> {
        Some(effect)
    }

    /// Sees (and may rewrite) the events produced by a dispatch before
    /// the store's subscribers are notified of them.
    fn on_notify(
        &self,
        _store: &Store<State, Action, Event, Effect>,
        events: Vec<Event>,
    ) -> Vec<Event> {
        events
    }
}
