// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event class and script API registration

use crate::funcdef::format_event_handler_funcdef;
use rivet_core::{
    Callback, EventArgs, EventRegistry, EventSystem, Preemptable, RegisterError,
    ScriptFunctionRef, TypeRegistry,
};

/// Exposed name of the event system foreign type.
pub const EVENT_SYSTEM_TYPE: &str = "EventSystem";

/// Exposed name of the generic event foreign type scripts subscribe through.
pub const EVENT_TYPE: &str = "Event";

/// Declare payload type `T` to the engine and the event registry.
///
/// Registers the reference-counted object type under `name` plus the handler
/// funcdef synthesized from it. Payloads without the preemption capability
/// register nothing else; use
/// [`register_preemptable_event_class`] for ones that carry it.
pub fn register_event_class<T: EventArgs + Clone>(
    types: &mut dyn TypeRegistry,
    events: &mut EventRegistry,
    name: &'static str,
) -> Result<(), RegisterError> {
    types.register_object_type(name)?;
    types.register_funcdef(&format_event_handler_funcdef(name))?;
    events.register::<T>(name)?;
    tracing::debug!(event = name, "event class registered");
    Ok(())
}

/// [`register_event_class`] plus the `Handled` property accessors.
///
/// Only payload types carrying the preemption capability can take this
/// entry point; the bound is the compile-time check.
pub fn register_preemptable_event_class<T: Preemptable + Clone>(
    types: &mut dyn TypeRegistry,
    events: &mut EventRegistry,
    name: &'static str,
) -> Result<(), RegisterError> {
    register_event_class::<T>(types, events, name)?;
    types.register_method(name, "bool get_Handled() const property")?;
    types.register_method(name, "void set_Handled(bool value) property")?;
    Ok(())
}

/// Declare the event system surface scripts talk to.
///
/// Scripts reach an event through the system, keyed by the event's exposed
/// type name, and call the generic Subscribe/Unsubscribe pair on it.
pub fn register_event_api(types: &mut dyn TypeRegistry) -> Result<(), RegisterError> {
    types.register_object_type(EVENT_SYSTEM_TYPE)?;
    types.register_object_type(EVENT_TYPE)?;
    types.register_method(EVENT_TYPE, "void Subscribe(?&in handler)")?;
    types.register_method(EVENT_TYPE, "void Unsubscribe(?&in handler)")?;
    Ok(())
}

/// Script-side Subscribe: attach `function` to the event exposed as `name`.
///
/// Returns false when no event is registered under that name; repeated
/// subscription of the same callable is silently ignored, as native
/// subscription is.
pub fn subscribe_script_listener(
    system: &EventSystem,
    name: &str,
    function: ScriptFunctionRef,
) -> bool {
    match system.event_named(name) {
        Some(event) => {
            event.subscribe(Callback::script(function));
            true
        }
        None => false,
    }
}

/// Script-side Unsubscribe: detach `function` from the event exposed as
/// `name`.
pub fn unsubscribe_script_listener(
    system: &EventSystem,
    name: &str,
    function: &ScriptFunctionRef,
) -> bool {
    match system.event_named(name) {
        Some(event) => {
            event.unsubscribe(&Callback::script(ScriptFunctionRef::clone(function)));
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "register_tests.rs"]
mod tests;
