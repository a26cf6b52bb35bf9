//! A [Middleware] reporting what happens during each
//! [Store::dispatch()] through the [log] facade.

use super::Middleware;
use crate::{Store, StoreEvent, Tagged};
use std::{fmt::Debug, hash::Hash};

/// Logs, for every dispatched action, the state before it, the action
/// with its [tag](Tagged::tag()), the state after it, and any effects
/// and events it produced. Everything is logged at one [log::Level],
/// [log::Level::Debug] unless set with
/// [level()](SimpleLoggerMiddleware::level()).
#[derive(Debug)]
pub struct SimpleLoggerMiddleware {
    level: log::Level,
}

impl SimpleLoggerMiddleware {
    pub fn new() -> Self {
        Self {
            level: log::Level::Debug,
        }
    }

    pub fn level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for SimpleLoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<State, Action, Event, Effect> Middleware<State, Action, Event, Effect>
    for SimpleLoggerMiddleware
where
    State: Debug,
    Action: Tagged + Debug,
    Event: StoreEvent + Clone + Hash + Eq + Debug,
    Effect: Debug,
{
    fn before_reduce(
        &self,
        store: &Store<State, Action, Event, Effect>,
        action: Action,
    ) -> Option<Action> {
        log::log!(self.level, "prev state: {:?}", store.state());
        log::log!(self.level, "action {}: {:?}", action.tag(), action);
        Some(action)
    }

    fn after_reduce(&self, store: &Store<State, Action, Event, Effect>, _action: &Action) {
        log::log!(self.level, "next state: {:?}", store.state());
    }

    fn process_effect(
        &self,
        _store: &Store<State, Action, Event, Effect>,
        effect: Effect,
    ) -> Option<Effect> {
        log::log!(self.level, "effect: {:?}", effect);
        Some(effect)
    }

    fn on_notify(
        &self,
        _store: &Store<State, Action, Event, Effect>,
        events: Vec<Event>,
    ) -> Vec<Event> {
        for event in &events {
            log::log!(self.level, "event: {:?}", event);
        }
        events
    }
}
