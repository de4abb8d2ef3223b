// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One event per registered payload type

use super::args::EventArgs;
use super::event::Event;
use super::typed::TypedEvent;
use crate::engine::{ExecutionContextRef, RegisterError};
use crate::module::Module;
use std::any::TypeId;
use std::rc::Rc;
use std::sync::Arc;

/// The set of payload types the registration layer has declared.
///
/// Insertion-ordered; the exposed name is the one scripts see, fixed at
/// registration time.
#[derive(Debug, Default)]
pub struct EventRegistry {
    entries: Vec<RegisteredType>,
}

#[derive(Debug)]
struct RegisteredType {
    type_id: TypeId,
    name: &'static str,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare payload type `T` under an exposed script name.
    pub fn register<T: EventArgs>(&mut self, name: &'static str) -> Result<(), RegisterError> {
        let type_id = TypeId::of::<T>();
        if self
            .entries
            .iter()
            .any(|entry| entry.type_id == type_id || entry.name == name)
        {
            return Err(RegisterError::Duplicate {
                declaration: name.to_string(),
            });
        }
        self.entries.push(RegisteredType { type_id, name });
        Ok(())
    }

    pub fn contains<T: EventArgs>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.entries.iter().any(|entry| entry.type_id == type_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One [`Event`] per registered payload type, bound to one execution context.
///
/// Native publishers reach their event through the type-parameterized
/// accessor; the script-facing surface reaches it by exposed name. Both hand
/// out views over the same underlying event instance.
pub struct EventSystem {
    entries: Vec<SystemEntry>,
}

struct SystemEntry {
    type_id: TypeId,
    name: &'static str,
    event: Rc<Event>,
}

impl EventSystem {
    /// Create one event per type in `registry`, each sharing `context`.
    pub fn new(registry: &EventRegistry, context: ExecutionContextRef) -> Self {
        let entries = registry
            .entries
            .iter()
            .map(|entry| SystemEntry {
                type_id: entry.type_id,
                name: entry.name,
                event: Event::new(Rc::clone(&context)),
            })
            .collect();
        Self { entries }
    }

    /// The typed event for payload `T`, or `None` if `T` was never
    /// registered.
    pub fn event<T: EventArgs>(&self) -> Option<TypedEvent<T>> {
        let type_id = TypeId::of::<T>();
        self.entries
            .iter()
            .find(|entry| entry.type_id == type_id)
            .map(|entry| TypedEvent::from_event(Rc::clone(&entry.event)))
    }

    /// The untyped event registered under an exposed script name.
    ///
    /// This is the accessor the script-facing Subscribe/Unsubscribe surface
    /// resolves through.
    pub fn event_named(&self, name: &str) -> Option<Rc<Event>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| Rc::clone(&entry.event))
    }

    /// Ask every event to drop the listeners owned by `module`.
    ///
    /// Called by the host after discarding a module, so no event keeps a
    /// callable from an unloaded unit alive.
    pub fn remove_functions_of_module(&self, module: &Arc<Module>) {
        tracing::debug!(module = %module.name(), "purging module listeners from all events");
        for entry in &self.entries {
            entry.event.remove_functions_of_module(module);
        }
    }

    pub fn event_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
