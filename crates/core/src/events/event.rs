// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The listener list and its synchronous fan-out

use super::args::{EventArgs, Handled};
use crate::engine::{same_function, CallError, ExecutionContextRef, ScriptFunctionRef};
use crate::module::{module_from_script_function, Module};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a dispatch pass.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("listener invocation failed: {0}")]
    Call(#[from] CallError),
}

/// A host-side listener with no owning module.
///
/// Identity is the closure allocation: clone the handle you subscribed with
/// to unsubscribe it later.
#[derive(Clone)]
pub struct NativeCallback(Rc<dyn Fn(&dyn EventArgs)>);

impl NativeCallback {
    pub fn new(callback: impl Fn(&dyn EventArgs) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    fn invoke(&self, args: &dyn EventArgs) {
        (self.0)(args);
    }
}

impl std::fmt::Debug for NativeCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NativeCallback")
    }
}

/// A listener handle: a scripted callable or a native closure.
///
/// Both are stored and invoked uniformly; only scripted callables have an
/// owning module, so only they can match a bulk module purge.
#[derive(Clone)]
pub enum Callback {
    Script(ScriptFunctionRef),
    Native(NativeCallback),
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script(function) => f.debug_tuple("Script").field(&function.name()).finish(),
            Self::Native(native) => std::fmt::Debug::fmt(native, f),
        }
    }
}

impl Callback {
    pub fn script(function: ScriptFunctionRef) -> Self {
        Self::Script(function)
    }

    pub fn native(callback: impl Fn(&dyn EventArgs) + 'static) -> Self {
        Self::Native(NativeCallback::new(callback))
    }

    /// Identity equality. Never compares by name or value.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Script(a), Self::Script(b)) => same_function(a, b),
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Script(function) => function.name(),
            Self::Native(_) => "<native>".to_string(),
        }
    }
}

/// An ordered, deduplicated set of listeners bound to one execution context.
///
/// Shared as `Rc<Event>`: events live on the thread that owns the scripting
/// engine instance. Dropping the last handle releases the context reference
/// and every listener reference.
pub struct Event {
    context: ExecutionContextRef,
    listeners: RefCell<Vec<Callback>>,
}

impl Event {
    pub fn new(context: ExecutionContextRef) -> Rc<Self> {
        Rc::new(Self {
            context,
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// True iff the callback identity is present in the listener list.
    pub fn is_subscribed(&self, callback: &Callback) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|existing| existing.same(callback))
    }

    /// Append a listener, taking a reference to it.
    ///
    /// Silently ignored when already subscribed. Dispatch order follows
    /// subscription order.
    pub fn subscribe(&self, callback: Callback) {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|existing| existing.same(&callback)) {
            return;
        }
        tracing::trace!(listener = %callback.label(), "listener subscribed");
        listeners.push(callback);
    }

    /// Remove a listener, releasing the held reference.
    ///
    /// Silently ignored when not subscribed.
    pub fn unsubscribe(&self, callback: &Callback) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|existing| existing.same(callback)) {
            listeners.remove(index);
            tracing::trace!(listener = %callback.label(), "listener unsubscribed");
        }
    }

    /// Remove every listener whose owning module is `module`.
    ///
    /// Native listeners and listeners from other modules survive in their
    /// original relative order.
    pub fn remove_functions_of_module(&self, module: &Arc<Module>) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|callback| match callback {
            Callback::Script(function) => module_from_script_function(function.as_ref())
                .map_or(true, |owner| !Arc::ptr_eq(&owner, module)),
            Callback::Native(_) => true,
        });
        let removed = before - listeners.len();
        if removed > 0 {
            tracing::debug!(module = %module.name(), removed, "purged module listeners");
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Invoke every listener with `args`, in subscription order.
    ///
    /// The pass iterates a snapshot taken at entry, so a listener that
    /// subscribes, unsubscribes, or re-enters dispatch cannot disturb the
    /// in-progress iteration; each nested pass snapshots independently.
    /// A preemptable payload marked handled stops the pass after the current
    /// listener; an engine fault aborts it and propagates.
    pub(crate) fn dispatch(&self, args: &Rc<dyn EventArgs>) -> Result<(), DispatchError> {
        let snapshot = self.listeners.borrow().clone();
        for callback in &snapshot {
            match callback {
                Callback::Script(function) => {
                    self.context.call(function, Rc::clone(args))?;
                }
                Callback::Native(native) => native.invoke(args.as_ref()),
            }
            if args.handled().is_some_and(Handled::get) {
                tracing::trace!(listener = %callback.label(), "payload handled, stopping pass");
                break;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
