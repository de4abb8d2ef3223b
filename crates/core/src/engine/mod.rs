// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability surface of the scripting engine, plus a fake for tests

pub mod fake;
pub mod traits;

// Re-exports
pub use traits::{
    same_function, CallError, ExecutionContext, ExecutionContextRef, RegisterError,
    ScriptFunction, ScriptFunctionRef, ScriptModule, ScriptModuleRef, TypeRegistry,
};

// Re-export the fake engine
pub use fake::{EngineCall, FakeEngine, FakeFunction, FakeModule, FakeTypeRegistry};
