// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rivet-bind: binds the event layer into the engine's type system
//!
//! Registration declares each payload type as a foreign reference-counted
//! object, synthesizes the matching handler funcdef so scripted and native
//! listeners share one callable shape, and wires the script-facing
//! Subscribe/Unsubscribe surface to the event system's name-keyed accessor.

mod funcdef;
mod register;

pub use funcdef::format_event_handler_funcdef;
pub use register::{
    register_event_api, register_event_class, register_preemptable_event_class,
    subscribe_script_listener, unsubscribe_script_listener, EVENT_SYSTEM_TYPE, EVENT_TYPE,
};
