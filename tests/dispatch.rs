use optiqs::{
    create_reducer,
    middleware::{simple_logger::SimpleLoggerMiddleware, Middleware},
    update_state, AsUpdate, Callback, CompositeReducer, Error, OptiqsReducer, Reducer,
    ReducerResult, StateUpdateFn, StateUpdated, Store, StoreEvent, Tagged, UpdatePayload,
    UpdateState, UPDATE_TAG,
};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, PartialEq)]
struct Counter {
    count: i32,
}

fn add(amount: i32) -> impl Fn(&Counter) -> Counter {
    move |counter: &Counter| Counter {
        count: counter.count + amount,
    }
}

#[derive(Debug)]
enum Action {
    Update(UpdateState<Counter>),
    Reset,
}

impl Tagged for Action {
    fn tag(&self) -> &str {
        match self {
            Action::Update(update) => update.tag(),
            Action::Reset => "RESET",
        }
    }
}

impl AsUpdate<Counter> for Action {
    fn as_update(&self) -> Option<&UpdateState<Counter>> {
        match self {
            Action::Update(update) => Some(update),
            Action::Reset => None,
        }
    }
}

impl From<UpdateState<Counter>> for Action {
    fn from(update: UpdateState<Counter>) -> Self {
        Action::Update(update)
    }
}

#[derive(Debug)]
enum Effect {
    Update(UpdateState<Counter>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Event {
    Updated,
    ResetRequested,
    None,
}

impl StoreEvent for Event {
    fn none() -> Self {
        Event::None
    }

    fn is_none(&self) -> bool {
        matches!(self, Event::None)
    }
}

impl From<StateUpdated> for Event {
    fn from(_: StateUpdated) -> Self {
        Event::Updated
    }
}

/// Answers [Action::Reset] with an effect carrying the transformer
/// which zeroes the counter.
struct ResetReducer;

impl Reducer<Counter, Action, Event, Effect> for ResetReducer {
    fn reduce(
        &self,
        prev_state: &Rc<Counter>,
        action: &Action,
    ) -> ReducerResult<Counter, Event, Effect> {
        match action {
            Action::Reset => ReducerResult {
                state: prev_state.clone(),
                events: vec![Event::ResetRequested],
                effects: vec![Effect::Update(UpdateState::new(|_: &Counter| Counter {
                    count: 0,
                }))],
            },
            Action::Update(_) => ReducerResult::unchanged(prev_state),
        }
    }
}

struct UpdateEffectMiddleware;

impl Middleware<Counter, Action, Event, Effect> for UpdateEffectMiddleware {
    fn process_effect(
        &self,
        store: &Store<Counter, Action, Event, Effect>,
        effect: Effect,
    ) -> Option<Effect> {
        match effect {
            Effect::Update(update) => store.dispatch(update),
        }
        None
    }
}

fn counter_reducer() -> CompositeReducer<Counter, Action, Event, Effect> {
    CompositeReducer::new(vec![
        Box::new(OptiqsReducer::<Counter>::new()),
        Box::new(ResetReducer),
    ])
}

fn event_log() -> (Rc<RefCell<Vec<(i32, Event)>>>, Callback<Counter, Event>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_copy = seen.clone();
    let callback = Callback::new(move |state: Rc<Counter>, event: Event| {
        seen_copy.borrow_mut().push((state.count, event));
    });
    (seen, callback)
}

#[test]
fn seeded_store_folds_updates() {
    let seed = create_reducer(Counter { count: 10 });
    let store = Store::seeded(counter_reducer(), &seed);
    store.add_middleware(UpdateEffectMiddleware);

    let (seen, callback) = event_log();
    store.subscribe_events(&callback, vec![Event::Updated]);

    store.dispatch(UpdateState::new(add(1)).then(add(2)).then(|c: &Counter| Counter {
        count: c.count * 2,
    }));
    assert_eq!(26, store.state().count);
    assert_eq!(vec![(26, Event::Updated)], *seen.borrow());

    // the seed is left as it was
    assert_eq!(10, seed.initial_state().count);
    assert_eq!(11, seed.apply(None, &UpdateState::new(add(1))).count);
}

#[test]
fn effect_update_dispatched_after_action() {
    let store = Store::new(counter_reducer(), Counter { count: 4 });
    store.add_middleware(UpdateEffectMiddleware);

    let (seen, callback) = event_log();
    store.subscribe_events(&callback, vec![Event::Updated, Event::ResetRequested]);

    store.dispatch(Action::Reset);
    assert_eq!(0, store.state().count);
    assert_eq!(
        vec![(4, Event::ResetRequested), (0, Event::Updated)],
        *seen.borrow()
    );
}

#[test]
fn action_without_update_leaves_state() {
    let store: Store<Counter, Action, Event, Effect> =
        Store::new(OptiqsReducer::<Counter>::new(), Counter { count: 4 });
    let prev_state = store.state();

    let (seen, callback) = event_log();
    store.subscribe(&callback);

    store.dispatch(Action::Reset);
    assert!(Rc::ptr_eq(&prev_state, &store.state()));
    assert!(seen.borrow().is_empty());

    store.dispatch(UpdateState::new(add(-4)));
    assert_eq!(vec![(0, Event::None)], *seen.borrow());
}

#[test]
fn empty_sequence_rejected() {
    let transformers: Vec<StateUpdateFn<Counter>> = Vec::new();
    assert!(matches!(
        UpdateState::sequence(transformers),
        Err(Error::InvalidPayload(_))
    ));

    let payload: UpdatePayload<Counter> = UpdatePayload::Sequence(Vec::new());
    let error = update_state(payload).unwrap_err();
    assert!(error.to_string().starts_with("invalid payload"));

    let transformer: StateUpdateFn<Counter> = Rc::new(add(5));
    let update = UpdateState::sequence(vec![transformer]).unwrap();
    assert_eq!(1, update.payload().len());
}

mod logging {
    use super::*;

    thread_local! {
        static MESSAGES: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Info
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                MESSAGES.with(|messages| messages.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    #[test]
    fn logged_action_line_carries_update_tag() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Info);

        let store = Store::new(counter_reducer(), Counter { count: 1 });
        store.add_middleware(SimpleLoggerMiddleware::new().level(log::Level::Info));
        store.add_middleware(UpdateEffectMiddleware);

        store.dispatch(UpdateState::new(add(1)));
        store.dispatch(Action::Reset);

        let actions: Vec<String> = MESSAGES.with(|messages| {
            messages
                .borrow()
                .iter()
                .filter(|message| message.starts_with("action "))
                .cloned()
                .collect()
        });

        assert_eq!(3, actions.len());
        assert!(actions[0].contains(UPDATE_TAG));
        assert!(actions[0].contains("__OPTIQS/UPDATE__"));
        assert!(actions[1].starts_with("action RESET"));
        assert!(actions[2].contains(UPDATE_TAG));
    }
}
