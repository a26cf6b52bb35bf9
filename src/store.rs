use crate::{
    listener::Listener, middleware::Middleware, Callback, Reducer, ReducerResult, SeededReducer,
    StoreEvent,
};
use std::{
    cell::{Cell, RefCell},
    collections::{HashSet, VecDeque},
    hash::Hash,
    rc::Rc,
};

struct Subscription<State, Event> {
    listener: Listener<State, Event>,
    /// When empty, the subscriber is notified once (with
    /// [StoreEvent::none()]) after every dispatch which produced events.
    events: HashSet<Event>,
}

/// Clears the dispatching flag of a [Store], also when a transformer
/// panics.
struct Dispatching<'a>(&'a Cell<bool>);

impl Drop for Dispatching<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

type MiddlewareList<State, Action, Event, Effect> =
    Vec<Rc<dyn Middleware<State, Action, Event, Effect>>>;

/// Holds the single shared `State` of an application.
///
/// The state is replaced only by dispatching an `Action`, which the
/// store's [Reducer] turns into the next state along with `Event`s
/// and `Effect`s. The previous state is never mutated; anyone holding
/// the `Rc` returned by [Store::state()] keeps seeing it.
///
/// Dispatch is strictly sequential: an action dispatched while another
/// is being processed (from a subscriber, a middleware or an effect)
/// is queued and processed once the current one is finished.
pub struct Store<State, Action, Event, Effect> {
    reducer: Box<dyn Reducer<State, Action, Event, Effect>>,
    state: RefCell<Rc<State>>,
    queue: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
    subscriptions: RefCell<Vec<Subscription<State, Event>>>,
    middleware: RefCell<MiddlewareList<State, Action, Event, Effect>>,
}

impl<State, Action, Event, Effect> Store<State, Action, Event, Effect>
where
    Event: StoreEvent + Clone + Hash + Eq,
{
    pub fn new<R: Reducer<State, Action, Event, Effect> + 'static>(
        reducer: R,
        initial_state: State,
    ) -> Self {
        Self::from_rc(reducer, Rc::new(initial_state))
    }

    /// Create a store which starts from the initial state held by
    /// `seed`. The store and `seed` share that state, so
    /// [SeededReducer::apply()] without a state and the fresh store
    /// agree on where updates start from.
    ///
    /// `reducer` is usually an [OptiqsReducer](crate::OptiqsReducer),
    /// possibly inside a [CompositeReducer](crate::CompositeReducer)
    /// with the application's own reducer.
    pub fn seeded<R: Reducer<State, Action, Event, Effect> + 'static>(
        reducer: R,
        seed: &SeededReducer<State>,
    ) -> Self {
        Self::from_rc(reducer, seed.initial_state())
    }

    fn from_rc<R: Reducer<State, Action, Event, Effect> + 'static>(
        reducer: R,
        initial_state: Rc<State>,
    ) -> Self {
        Self {
            reducer: Box::new(reducer),
            state: RefCell::new(initial_state),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            subscriptions: RefCell::new(Vec::new()),
            middleware: RefCell::new(Vec::new()),
        }
    }

    /// The current state.
    pub fn state(&self) -> Rc<State> {
        self.state.borrow().clone()
    }

    /// Reduce `action` into the next state, then run its effects and
    /// notify subscribers of its events.
    pub fn dispatch<A: Into<Action>>(&self, action: A) {
        self.queue.borrow_mut().push_back(action.into());

        if self.dispatching.replace(true) {
            log::trace!("dispatch in progress, action queued");
            return;
        }
        let _dispatching = Dispatching(&self.dispatching);

        loop {
            // the queue must not stay borrowed while the action is processed
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(action) => self.process(action),
                None => break,
            }
        }
    }

    fn process(&self, action: Action) {
        // additions made during this dispatch apply from the next action
        let middleware = self.middleware.borrow().clone();

        let action = match middleware
            .iter()
            .try_fold(action, |action, m| m.before_reduce(self, action))
        {
            Some(action) => action,
            None => {
                log::trace!("action dropped by middleware");
                return;
            }
        };

        let ReducerResult {
            state,
            events,
            effects,
        } = self.reducer.reduce(&self.state(), &action);
        *self.state.borrow_mut() = state;

        for m in &middleware {
            m.after_reduce(self, &action);
        }

        for effect in effects {
            let unhandled = middleware
                .iter()
                .try_fold(effect, |effect, m| m.process_effect(self, effect));
            if unhandled.is_some() {
                log::trace!("effect not consumed by any middleware");
            }
        }

        let events = middleware
            .iter()
            .fold(events, |events, m| m.on_notify(self, events));
        if !events.is_empty() {
            self.notify(&events);
        }
    }

    fn notify(&self, events: &[Event]) {
        let mut pending = Vec::new();

        self.subscriptions.borrow_mut().retain(|subscription| {
            let callback = match subscription.listener.upgrade() {
                Some(callback) => callback,
                None => return false,
            };

            if subscription.events.is_empty() {
                pending.push((callback, Event::none()));
            } else {
                for event in events.iter().filter(|e| subscription.events.contains(e)) {
                    pending.push((callback.clone(), event.clone()));
                }
            }
            true
        });

        // subscriptions are released, callbacks may subscribe or dispatch
        let state = self.state();
        for (callback, event) in pending {
            callback.emit(state.clone(), event);
        }
    }

    /// Notify `callback` after every dispatch which produced events.
    /// The store only holds a weak reference to it.
    pub fn subscribe(&self, callback: &Callback<State, Event>) {
        self.subscribe_events(callback, None);
    }

    /// Notify `callback` of each of `events` produced by a dispatch.
    pub fn subscribe_events<E: IntoIterator<Item = Event>>(
        &self,
        callback: &Callback<State, Event>,
        events: E,
    ) {
        self.subscriptions.borrow_mut().push(Subscription {
            listener: callback.listener(),
            events: events.into_iter().collect(),
        });
    }

    pub fn add_middleware<M: Middleware<State, Action, Event, Effect> + 'static>(
        &self,
        middleware: M,
    ) {
        self.middleware.borrow_mut().push(Rc::new(middleware));
    }
}
