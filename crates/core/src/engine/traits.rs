// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trait definitions for the scripting engine integration
//!
//! The engine owns compiled modules and callable functions; this crate only
//! ever sees them through these traits. Shared handles to engine objects are
//! `Arc`s: cloning one is the acquire half of the engine's reference-count
//! contract, dropping it the release half.

use crate::events::EventArgs;
use crate::module::ModuleTag;
use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// Engine-owned objects
// =============================================================================

/// Shared handle to an engine-owned compiled module.
pub type ScriptModuleRef = Arc<dyn ScriptModule>;

/// Shared handle to an engine-owned callable.
pub type ScriptFunctionRef = Arc<dyn ScriptFunction>;

/// An opaque compiled unit owned by the scripting engine.
pub trait ScriptModule: Send + Sync {
    /// The engine-side module name.
    fn name(&self) -> String;

    /// The user-data slot this crate uses to find the owning registry handle.
    fn tag(&self) -> &ModuleTag;

    /// Unload the compiled unit inside the engine.
    ///
    /// Called once, from [`Module::discard`](crate::module::Module::discard).
    fn discard(&self);

    /// Downcast support for engine implementations.
    fn as_any(&self) -> &dyn Any;
}

/// An opaque callable owned by the scripting engine.
pub trait ScriptFunction: Send + Sync {
    /// The engine-side function name.
    fn name(&self) -> String;

    /// The compiled unit this callable was declared in, if any.
    ///
    /// Engine-internal or system functions report `None`.
    fn module(&self) -> Option<ScriptModuleRef>;

    /// Downcast support for engine implementations.
    fn as_any(&self) -> &dyn Any;
}

/// Identity comparison for callables.
///
/// Engine handles are identity-comparable: two refs name the same callable
/// iff they share the allocation. Listener dedup and unsubscribe both key on
/// this, never on names or declarations.
pub fn same_function(a: &ScriptFunctionRef, b: &ScriptFunctionRef) -> bool {
    Arc::ptr_eq(a, b)
}

// =============================================================================
// Execution
// =============================================================================

/// Errors surfaced by the engine while running a callable.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("script exception in {function}: {message}")]
    Exception { function: String, message: String },
    #[error("execution aborted in {function}")]
    Aborted { function: String },
    #[error("not callable by this context: {function}")]
    NotCallable { function: String },
}

/// Shared handle to an execution context.
///
/// Contexts belong to the thread that owns the engine instance, so the
/// handle is non-atomic.
pub type ExecutionContextRef = Rc<dyn ExecutionContext>;

/// The execute-callable capability of the running engine.
pub trait ExecutionContext {
    /// Run `function` with `args` as its single parameter.
    ///
    /// The payload is handed over as an owned shared handle so a callee that
    /// retains it extends its lifetime instead of aliasing the caller.
    fn call(
        &self,
        function: &ScriptFunctionRef,
        args: Rc<dyn EventArgs>,
    ) -> Result<(), CallError>;
}

// =============================================================================
// Type registration
// =============================================================================

/// Errors surfaced by the engine while declaring foreign types.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("already registered: {declaration}")]
    Duplicate { declaration: String },
    #[error("invalid declaration {declaration}: {message}")]
    Invalid { declaration: String, message: String },
}

/// The type-declaration capability of the engine's reflection system.
///
/// Declarations use the engine's textual signature syntax; this crate only
/// synthesizes and forwards them.
pub trait TypeRegistry {
    /// Declare a foreign reference-counted object type.
    fn register_object_type(&mut self, name: &str) -> Result<(), RegisterError>;

    /// Declare a callable-type signature (funcdef).
    fn register_funcdef(&mut self, declaration: &str) -> Result<(), RegisterError>;

    /// Declare a method or property accessor on a registered type.
    fn register_method(&mut self, type_name: &str, declaration: &str)
        -> Result<(), RegisterError>;
}
