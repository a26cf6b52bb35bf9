use crate::{apply, AsUpdate, StateUpdated};
use std::{marker::PhantomData, rc::Rc};

/// Turns an `Action` dispatched to a [Store](crate::Store) into the
/// store's next `State`.
pub trait Reducer<State, Action, Event, Effect> {
    /// Produce the state following `prev_state` once `action` is
    /// applied. `prev_state` itself is left untouched; a reducer with
    /// nothing to do for `action` returns a clone of the same `Rc`.
    ///
    /// The returned events tell subscribers what changed, an empty
    /// list means nobody is notified. Effects are handed to the
    /// store's [Middleware](crate::middleware::Middleware), which may
    /// dispatch further actions for them.
    fn reduce(
        &self,
        prev_state: &Rc<State>,
        action: &Action,
    ) -> ReducerResult<State, Event, Effect>;
}

/// Returned by [Reducer::reduce()].
pub struct ReducerResult<State, Event, Effect> {
    pub state: Rc<State>,
    pub events: Vec<Event>,
    pub effects: Vec<Effect>,
}

impl<State, Event, Effect> ReducerResult<State, Event, Effect> {
    /// `state` unchanged, without events or effects.
    pub fn unchanged(state: &Rc<State>) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
            effects: Vec::new(),
        }
    }
}

/// Runs several reducers one after the other on the same action.
/// Each sees the state left by the one before it, and the events and
/// effects of all of them are concatenated in that order.
pub struct CompositeReducer<State, Action, Event, Effect> {
    reducers: Vec<Box<dyn Reducer<State, Action, Event, Effect>>>,
}

impl<State, Action, Event, Effect> CompositeReducer<State, Action, Event, Effect> {
    pub fn new(reducers: Vec<Box<dyn Reducer<State, Action, Event, Effect>>>) -> Self {
        CompositeReducer { reducers }
    }
}

impl<State, Action, Event, Effect> Reducer<State, Action, Event, Effect>
    for CompositeReducer<State, Action, Event, Effect>
{
    fn reduce(
        &self,
        prev_state: &Rc<State>,
        action: &Action,
    ) -> ReducerResult<State, Event, Effect> {
        self.reducers
            .iter()
            .fold(ReducerResult::unchanged(prev_state), |mut acc, reducer| {
                let next = reducer.reduce(&acc.state, action);
                acc.state = next.state;
                acc.events.extend(next.events);
                acc.effects.extend(next.effects);
                acc
            })
    }
}

/// Applies [UpdateState](crate::UpdateState) actions with [apply()],
/// and emits a single [StateUpdated] event when the state was
/// updated. Every other action leaves the state as it is, without
/// events.
///
/// Combine it with the application's own reducer using a
/// [CompositeReducer] when the application also dispatches other
/// kinds of actions.
pub struct OptiqsReducer<State> {
    phantom_state: PhantomData<fn(&State) -> State>,
}

impl<State> OptiqsReducer<State> {
    pub fn new() -> Self {
        Self {
            phantom_state: PhantomData,
        }
    }
}

impl<State> Default for OptiqsReducer<State> {
    fn default() -> Self {
        Self::new()
    }
}

impl<State> Clone for OptiqsReducer<State> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<State, Action, Event, Effect> Reducer<State, Action, Event, Effect> for OptiqsReducer<State>
where
    Action: AsUpdate<State>,
    Event: From<StateUpdated>,
{
    fn reduce(
        &self,
        prev_state: &Rc<State>,
        action: &Action,
    ) -> ReducerResult<State, Event, Effect> {
        let state = apply(prev_state, action);

        // transformers always produce a new allocation
        if Rc::ptr_eq(&state, prev_state) {
            return ReducerResult::unchanged(prev_state);
        }

        ReducerResult {
            state,
            events: vec![StateUpdated.into()],
            effects: Vec::new(),
        }
    }
}

/// Holds the initial state of an application, used in place of the
/// state when none exists yet.
///
/// A [SeededReducer] is not itself a [Reducer]: a store always has a
/// state, so the seed only matters to [SeededReducer::apply()] and to
/// [Store::seeded()](crate::Store::seeded()), which starts a store from
/// it. Dispatching through that store goes through whatever reducer it
/// was given, usually an [OptiqsReducer].
///
/// See [create_reducer()].
pub struct SeededReducer<State> {
    initial_state: Rc<State>,
}

impl<State> SeededReducer<State> {
    pub fn new(initial_state: State) -> Self {
        Self {
            initial_state: Rc::new(initial_state),
        }
    }

    /// The state substituted by [SeededReducer::apply()] when no
    /// state is supplied.
    pub fn initial_state(&self) -> Rc<State> {
        self.initial_state.clone()
    }

    /// Like [apply()](crate::apply()), but falls back to the initial
    /// state of this reducer when `state` is `None`. Never returns an
    /// absent state.
    pub fn apply<A>(&self, state: Option<&Rc<State>>, action: &A) -> Rc<State>
    where
        A: AsUpdate<State> + ?Sized,
    {
        apply(state.unwrap_or(&self.initial_state), action)
    }
}

impl<State> Clone for SeededReducer<State> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
        }
    }
}

/// Create a [SeededReducer] which substitutes `initial_state` whenever
/// it applies an action without a state.
pub fn create_reducer<State>(initial_state: State) -> SeededReducer<State> {
    SeededReducer::new(initial_state)
}
