//! A to-do list whose state is changed only through
//! [UpdateState] transformers.
//!
//! Actions issued by the "view" (`AddTodo`, `ToggleTodo`,
//! `SetVisibilityFilter`) are reduced into effects, and
//! [UpdateEffectMiddleware] turns each effect into an [UpdateState]
//! dispatch carrying the transformer which performs the change.
//!
//! Run with `cargo run --example todos`.

use optiqs::{
    middleware::{simple_logger::SimpleLoggerMiddleware, Middleware},
    AsUpdate, Callback, CompositeReducer, OptiqsReducer, Reducer, ReducerResult, StateUpdated,
    Store, StoreEvent, Tagged, UpdateState,
};
use std::rc::Rc;

pub type Id = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    ShowAll,
    ShowActive,
    ShowCompleted,
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        VisibilityFilter::ShowAll
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: Id,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub todos: Vec<Todo>,
    /// Id given to the next todo added to the list.
    pub next_id: Id,
    pub visibility_filter: VisibilityFilter,
}

/// Appends a new, active todo, taking its id from the state's counter.
pub fn add_todo(text: String) -> impl Fn(&State) -> State {
    move |state: &State| {
        let mut todos = state.todos.clone();
        todos.push(Todo {
            id: state.next_id,
            text: text.clone(),
            completed: false,
        });

        State {
            todos,
            next_id: state.next_id + 1,
            ..state.clone()
        }
    }
}

pub fn toggle_todo(id: Id) -> impl Fn(&State) -> State {
    move |state: &State| State {
        todos: state
            .todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    Todo {
                        completed: !todo.completed,
                        ..todo.clone()
                    }
                } else {
                    todo.clone()
                }
            })
            .collect(),
        ..state.clone()
    }
}

pub fn set_visibility_filter(filter: VisibilityFilter) -> impl Fn(&State) -> State {
    move |state: &State| State {
        visibility_filter: filter,
        ..state.clone()
    }
}

/// The todos shown for the current visibility filter.
pub fn visible_todos(state: &State) -> Vec<&Todo> {
    state
        .todos
        .iter()
        .filter(|todo| match state.visibility_filter {
            VisibilityFilter::ShowAll => true,
            VisibilityFilter::ShowActive => !todo.completed,
            VisibilityFilter::ShowCompleted => todo.completed,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub enum Action {
    AddTodo(String),
    ToggleTodo(Id),
    SetVisibilityFilter(VisibilityFilter),
    Update(UpdateState<State>),
}

impl Tagged for Action {
    fn tag(&self) -> &str {
        match self {
            Action::AddTodo(_) => "ADD_TODO",
            Action::ToggleTodo(_) => "TOGGLE_TODO",
            Action::SetVisibilityFilter(_) => "SET_VISIBILITY_FILTER",
            Action::Update(update) => update.tag(),
        }
    }
}

impl AsUpdate<State> for Action {
    fn as_update(&self) -> Option<&UpdateState<State>> {
        match self {
            Action::Update(update) => Some(update),
            _ => None,
        }
    }
}

impl From<UpdateState<State>> for Action {
    fn from(update: UpdateState<State>) -> Self {
        Action::Update(update)
    }
}

#[derive(Debug)]
pub enum Effect {
    Update(UpdateState<State>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    StateUpdated,
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
        Event::StateUpdated
    }
}

/// Turns the todo actions into effects carrying the matching state
/// transformer. The state itself is only changed by [OptiqsReducer].
pub struct TodoReducer;

impl Reducer<State, Action, Event, Effect> for TodoReducer {
    fn reduce(
        &self,
        prev_state: &Rc<State>,
        action: &Action,
    ) -> ReducerResult<State, Event, Effect> {
        let update = match action {
            Action::AddTodo(text) if text.trim().is_empty() => None,
            Action::AddTodo(text) => Some(UpdateState::new(add_todo(text.clone()))),
            Action::ToggleTodo(id) => Some(UpdateState::new(toggle_todo(*id))),
            Action::SetVisibilityFilter(filter) => {
                Some(UpdateState::new(set_visibility_filter(*filter)))
            }
            Action::Update(_) => None,
        };

        ReducerResult {
            state: prev_state.clone(),
            events: Vec::new(),
            effects: update.into_iter().map(Effect::Update).collect(),
        }
    }
}

/// Dispatches the [UpdateState] carried by each [Effect::Update].
pub struct UpdateEffectMiddleware;

impl Middleware<State, Action, Event, Effect> for UpdateEffectMiddleware {
    fn process_effect(
        &self,
        store: &Store<State, Action, Event, Effect>,
        effect: Effect,
    ) -> Option<Effect> {
        match effect {
            Effect::Update(update) => store.dispatch(update),
        }

        None
    }
}

pub fn create_store() -> Store<State, Action, Event, Effect> {
    let reducer: CompositeReducer<State, Action, Event, Effect> = CompositeReducer::new(vec![
        Box::new(OptiqsReducer::<State>::new()),
        Box::new(TodoReducer),
    ]);

    let store = Store::new(reducer, State::default());
    store.add_middleware(UpdateEffectMiddleware);
    store
}

fn render(state: &State) {
    println!("filter: {:?}", state.visibility_filter);
    for todo in visible_todos(state) {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{}] {} {}", mark, todo.id, todo.text);
    }
}

/// Set `RUST_LOG=debug` to see each dispatch logged.
fn main() {
    env_logger::init();

    let store = create_store();
    store.add_middleware(SimpleLoggerMiddleware::new());

    let callback: Callback<State, Event> = Callback::new(|state: Rc<State>, _| render(&state));
    store.subscribe(&callback);

    store.dispatch(Action::AddTodo("write the store".to_string()));
    store.dispatch(Action::AddTodo("dispatch functions".to_string()));
    store.dispatch(Action::AddTodo("   ".to_string()));
    store.dispatch(Action::ToggleTodo(0));
    store.dispatch(Action::SetVisibilityFilter(VisibilityFilter::ShowActive));
}
