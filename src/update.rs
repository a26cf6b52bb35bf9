//! Update messages which carry plain state transformer functions,
//! and the [apply()] operation which folds them over a state.
//!
//! Instead of writing an `Action` variant and a matching branch in a
//! [Reducer](crate::Reducer) for every change to the state, an
//! application can dispatch an [UpdateState] carrying the function(s)
//! which produce the next state:
//!
//! ```
//! use optiqs::{apply, UpdateState};
//! use std::rc::Rc;
//!
//! #[derive(Debug, PartialEq)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! let update = UpdateState::new(|s: &Counter| Counter { count: s.count + 1 })
//!     .then(|s: &Counter| Counter { count: s.count * 10 });
//!
//! let state = Rc::new(Counter { count: 1 });
//! assert_eq!(Counter { count: 20 }, *apply(&state, &update));
//! ```

use crate::error::{Error, Result};
use std::{fmt::Debug, rc::Rc};

/// The discriminant tag carried by every [UpdateState]. No other
/// kind of action in an application may report this tag from
/// [Tagged::tag()].
pub const UPDATE_TAG: &str = "__OPTIQS/UPDATE__";

/// A pure function which takes the current state and produces the
/// next state.
pub type StateUpdateFn<State> = Rc<dyn Fn(&State) -> State>;

/// Implemented by actions dispatched to a [Store](crate::Store), to
/// report the discriminant tag of the kind of action.
pub trait Tagged {
    fn tag(&self) -> &str;
}

/// Implemented by an application's `Action` type to expose the
/// [UpdateState] it may be carrying.
///
/// ```
/// use optiqs::{AsUpdate, Tagged, UpdateState, UPDATE_TAG};
///
/// struct State;
///
/// enum Action {
///     Update(UpdateState<State>),
///     Reset,
/// }
///
/// impl Tagged for Action {
///     fn tag(&self) -> &str {
///         match self {
///             Action::Update(update) => update.tag(),
///             Action::Reset => "RESET",
///         }
///     }
/// }
///
/// impl AsUpdate<State> for Action {
///     fn as_update(&self) -> Option<&UpdateState<State>> {
///         match self {
///             Action::Update(update) => Some(update),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(UPDATE_TAG, Action::Update(UpdateState::new(|_| State)).tag());
/// ```
pub trait AsUpdate<State>: Tagged {
    /// Returns `Some` if this action is an [UpdateState].
    fn as_update(&self) -> Option<&UpdateState<State>>;
}

/// The transformer(s) carried by an [UpdateState].
pub enum UpdatePayload<State> {
    Single(StateUpdateFn<State>),
    /// Applied in order, the output of each transformer being the
    /// input to the next.
    Sequence(Vec<StateUpdateFn<State>>),
}

impl<State> UpdatePayload<State> {
    /// Create a payload containing a single transformer.
    pub fn single<F: Fn(&State) -> State + 'static>(transformer: F) -> Self {
        UpdatePayload::Single(Rc::new(transformer))
    }

    /// The number of transformers in this payload.
    pub fn len(&self) -> usize {
        match self {
            UpdatePayload::Single(_) => 1,
            UpdatePayload::Sequence(transformers) => transformers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the transformer(s) to `state`, producing the next state.
    fn apply(&self, state: &Rc<State>) -> Rc<State> {
        match self {
            UpdatePayload::Single(transformer) => Rc::new(transformer(state)),
            UpdatePayload::Sequence(transformers) => transformers
                .iter()
                .fold(state.clone(), |state, transformer| {
                    Rc::new(transformer(&state))
                }),
        }
    }
}

impl<State> Clone for UpdatePayload<State> {
    fn clone(&self) -> Self {
        match self {
            UpdatePayload::Single(transformer) => UpdatePayload::Single(transformer.clone()),
            UpdatePayload::Sequence(transformers) => {
                UpdatePayload::Sequence(transformers.clone())
            }
        }
    }
}

impl<State> From<StateUpdateFn<State>> for UpdatePayload<State> {
    fn from(transformer: StateUpdateFn<State>) -> Self {
        UpdatePayload::Single(transformer)
    }
}

impl<State> From<Vec<StateUpdateFn<State>>> for UpdatePayload<State> {
    fn from(transformers: Vec<StateUpdateFn<State>>) -> Self {
        UpdatePayload::Sequence(transformers)
    }
}

/// An action which updates the state of a [Store](crate::Store) by
/// applying the state transformer function(s) it carries.
///
/// See [apply()].
pub struct UpdateState<State> {
    payload: UpdatePayload<State>,
}

impl<State> UpdateState<State> {
    /// Create an [UpdateState] carrying a single transformer.
    pub fn new<F: Fn(&State) -> State + 'static>(transformer: F) -> Self {
        Self {
            payload: UpdatePayload::single(transformer),
        }
    }

    /// Create an [UpdateState] carrying an ordered sequence of
    /// transformers. Returns [Error::InvalidPayload] if `transformers`
    /// is empty.
    pub fn sequence<I>(transformers: I) -> Result<Self>
    where
        I: IntoIterator<Item = StateUpdateFn<State>>,
    {
        update_state(UpdatePayload::Sequence(transformers.into_iter().collect()))
    }

    /// Append a transformer, to be applied to the output of the
    /// transformers already carried by this update.
    pub fn then<F: Fn(&State) -> State + 'static>(self, transformer: F) -> Self {
        let transformer: StateUpdateFn<State> = Rc::new(transformer);
        let transformers = match self.payload {
            UpdatePayload::Single(first) => vec![first, transformer],
            UpdatePayload::Sequence(mut transformers) => {
                transformers.push(transformer);
                transformers
            }
        };

        Self {
            payload: UpdatePayload::Sequence(transformers),
        }
    }

    pub fn payload(&self) -> &UpdatePayload<State> {
        &self.payload
    }
}

/// Create an [UpdateState] with the given `payload`. Returns
/// [Error::InvalidPayload] for an empty sequence of transformers.
pub fn update_state<State>(payload: UpdatePayload<State>) -> Result<UpdateState<State>> {
    if payload.is_empty() {
        return Err(Error::InvalidPayload(
            "sequence of state transformers is empty".to_string(),
        ));
    }

    Ok(UpdateState { payload })
}

impl<State> Clone for UpdateState<State> {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
        }
    }
}

impl<State> Debug for UpdateState<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateState")
            .field("tag", &UPDATE_TAG)
            .field("transformers", &self.payload.len())
            .finish()
    }
}

/// Always [UPDATE_TAG].
impl<State> Tagged for UpdateState<State> {
    fn tag(&self) -> &str {
        UPDATE_TAG
    }
}

impl<State> AsUpdate<State> for UpdateState<State> {
    fn as_update(&self) -> Option<&UpdateState<State>> {
        Some(self)
    }
}

/// Produce the next state by applying the transformer(s) carried by
/// `action`, if it is an [UpdateState]. Sequences are folded over the
/// state in order.
///
/// Any other action returns `state` itself; the previous state is
/// never modified.
pub fn apply<State, A>(state: &Rc<State>, action: &A) -> Rc<State>
where
    A: AsUpdate<State> + ?Sized,
{
    if action.tag() != UPDATE_TAG {
        return state.clone();
    }

    match action.as_update() {
        Some(update) => {
            log::trace!(
                "applying {} state transformer(s)",
                update.payload().len()
            );
            update.payload().apply(state)
        }
        None => {
            log::warn!(
                "action tagged {} carries no update payload, state unchanged",
                UPDATE_TAG
            );
            state.clone()
        }
    }
}
