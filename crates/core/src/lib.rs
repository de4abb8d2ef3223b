// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rivet-core: event dispatch and module registry for script embedding
//!
//! This crate provides:
//! - A synchronous event dispatch engine broadcasting typed payloads to
//!   mixed native and scripted listener sets
//! - A registry of reference-counted handles around engine-compiled script
//!   modules, with descriptor-based ordering and reverse lookup
//! - The capability traits a scripting engine must implement to plug in,
//!   plus a fake engine for tests
//!
//! Events live on the thread that owns the scripting engine (`Rc`-shared,
//! non-atomic). Module handles may be touched from other contexts during
//! unload, so they are `Arc`-shared.

pub mod id;

pub mod engine;
pub mod events;
pub mod module;

// Re-exports
pub use id::HandleId;

pub use events::{
    Callback, DispatchError, Event, EventArgs, EventRegistry, EventSystem, Handled,
    NativeCallback, Preemptable, TypedEvent,
};

pub use module::{
    module_from_script_function, module_from_script_module, Module, ModuleDescriptor,
    ModuleError, ModuleManager, ModuleTag,
};

// Re-export the engine capability surface
pub use engine::{
    same_function, CallError, EngineCall, ExecutionContext, ExecutionContextRef, FakeEngine,
    FakeModule, FakeTypeRegistry, RegisterError, ScriptFunction, ScriptFunctionRef, ScriptModule,
    ScriptModuleRef, TypeRegistry,
};
