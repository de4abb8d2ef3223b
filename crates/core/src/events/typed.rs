// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type-safe dispatch entry point for native publishers

use super::args::EventArgs;
use super::event::{Callback, DispatchError, Event};
use crate::engine::ExecutionContextRef;
use crate::module::Module;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

/// A view binding one [`Event`] to exactly one payload type.
///
/// Carries no state beyond the event handle; it exists so native publishers
/// can only feed an event the payload type it was registered with. Raw
/// `Event::dispatch` stays crate-private for the same reason.
pub struct TypedEvent<T: EventArgs> {
    event: Rc<Event>,
    _payload: PhantomData<fn(T)>,
}

impl<T: EventArgs> TypedEvent<T> {
    /// A standalone typed event bound to an execution context.
    pub fn new(context: ExecutionContextRef) -> Self {
        Self::from_event(Event::new(context))
    }

    pub(crate) fn from_event(event: Rc<Event>) -> Self {
        Self {
            event,
            _payload: PhantomData,
        }
    }

    pub fn subscribe(&self, callback: Callback) {
        self.event.subscribe(callback);
    }

    pub fn unsubscribe(&self, callback: &Callback) {
        self.event.unsubscribe(callback);
    }

    pub fn is_subscribed(&self, callback: &Callback) -> bool {
        self.event.is_subscribed(callback)
    }

    pub fn remove_functions_of_module(&self, module: &Arc<Module>) {
        self.event.remove_functions_of_module(module);
    }

    /// The untyped event this view wraps.
    pub fn as_event(&self) -> &Rc<Event> {
        &self.event
    }

    /// Dispatch a payload the caller keeps ownership of.
    ///
    /// The payload is cloned into a shared allocation first, so a listener
    /// that retains it holds an independent instance rather than an alias of
    /// the caller's stack frame. Mutations are not visible to the caller;
    /// use [`dispatch_shared`](Self::dispatch_shared) for that.
    pub fn dispatch(&self, args: &T) -> Result<(), DispatchError>
    where
        T: Clone,
    {
        let shared: Rc<dyn EventArgs> = Rc::new(args.clone());
        self.event.dispatch(&shared)
    }

    /// Dispatch an already-shared payload.
    ///
    /// Listeners see the caller's instance, so the caller can observe
    /// in-place mutation (the handled flag, output cells) after the call
    /// returns.
    pub fn dispatch_shared(&self, args: &Rc<T>) -> Result<(), DispatchError> {
        let shared: Rc<dyn EventArgs> = Rc::<T>::clone(args);
        self.event.dispatch(&shared)
    }
}

impl<T: EventArgs> Clone for TypedEvent<T> {
    fn clone(&self) -> Self {
        Self {
            event: Rc::clone(&self.event),
            _payload: PhantomData,
        }
    }
}

#[cfg(test)]
#[path = "typed_tests.rs"]
mod tests;
