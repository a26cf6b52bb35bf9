use std::rc::{Rc, Weak};

type ListenerFn<State, Event> = dyn Fn(Rc<State>, Event);

/// A closure notified with the new state of a [Store](crate::Store)
/// after a dispatch produced events.
///
/// The store only keeps a weak reference to the closure: once every
/// clone of the [Callback] is dropped the subscription is removed.
pub struct Callback<State, Event>(Rc<ListenerFn<State, Event>>);

impl<State, Event> Callback<State, Event> {
    pub fn new<C: Fn(Rc<State>, Event) + 'static>(closure: C) -> Self {
        Callback(Rc::new(closure))
    }

    pub fn emit(&self, state: Rc<State>, event: Event) {
        (self.0)(state, event)
    }

    pub(crate) fn listener(&self) -> Listener<State, Event> {
        Listener(Rc::downgrade(&self.0))
    }
}

impl<State, Event> Clone for Callback<State, Event> {
    fn clone(&self) -> Self {
        Callback(self.0.clone())
    }
}

impl<C, State, Event> From<C> for Callback<State, Event>
where
    C: Fn(Rc<State>, Event) + 'static,
{
    fn from(closure: C) -> Self {
        Callback::new(closure)
    }
}

/// The weak half of a [Callback], held by the store.
pub(crate) struct Listener<State, Event>(Weak<ListenerFn<State, Event>>);

impl<State, Event> Listener<State, Event> {
    /// `None` once the [Callback] has been dropped.
    pub(crate) fn upgrade(&self) -> Option<Callback<State, Event>> {
        self.0.upgrade().map(Callback)
    }
}
