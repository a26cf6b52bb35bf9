//! Update the state of a centralized, redux-like [Store] by
//! dispatching plain state transformer functions, instead of writing a
//! discrete `Action` and [Reducer] branch for every change.
//!
//! An [UpdateState] carries one transformer, or an ordered sequence of
//! them, and [apply()] folds them over the current state. Host it in
//! a [Store] with an [OptiqsReducer], combined with the application's
//! own reducer using a [CompositeReducer] where needed. A
//! [SeededReducer] created with [create_reducer()] holds the initial
//! state, see [Store::seeded()].
//!
//! ```
//! use optiqs::{OptiqsReducer, Store, UpdateState};
//!
//! #[derive(Debug, PartialEq)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! let store: Store<Counter, UpdateState<Counter>, (), ()> =
//!     Store::new(OptiqsReducer::<Counter>::new(), Counter { count: 1 });
//!
//! store.dispatch(UpdateState::new(|s: &Counter| Counter { count: s.count + 1 }));
//! assert_eq!(Counter { count: 2 }, *store.state());
//! ```

mod error;
mod event;
mod listener;
pub mod middleware;
mod reducer;
mod store;
mod update;

pub use error::{Error, Result};
pub use event::*;
pub use listener::*;
pub use reducer::*;
pub use store::Store;
pub use update::*;
