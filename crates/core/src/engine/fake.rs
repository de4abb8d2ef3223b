// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake engine implementation for testing

use super::traits::{
    CallError, ExecutionContext, ExecutionContextRef, RegisterError, ScriptFunction,
    ScriptFunctionRef, ScriptModule, ScriptModuleRef, TypeRegistry,
};
use crate::events::EventArgs;
use crate::module::ModuleTag;
use std::any::Any;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Recorded call to an engine capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    CompileModule { name: String },
    DiscardModule { name: String },
    CallFunction { name: String },
    RegisterObjectType { name: String },
    RegisterFuncdef { declaration: String },
    RegisterMethod { type_name: String, declaration: String },
}

/// Shared state for the fake engine
#[derive(Default)]
struct FakeState {
    calls: Vec<EngineCall>,
    declarations: Vec<String>,
    // Configurable failure modes
    fail_calls: Option<String>,
}

fn state_of(state: &Arc<Mutex<FakeState>>) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-process stand-in for the scripting engine.
///
/// Compiles nothing: a "compiled" module is a bag of named functions whose
/// behavior is a host-provided closure. Every capability call is recorded
/// for assertions, and function invocation can be made to fail to exercise
/// fault propagation.
#[derive(Default)]
pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        state_of(&self.state)
    }

    /// Produce a "compiled" unit under the given name.
    pub fn compile_module(&self, name: &str) -> Arc<FakeModule> {
        self.state().calls.push(EngineCall::CompileModule {
            name: name.to_string(),
        });
        Arc::new_cyclic(|self_weak| FakeModule {
            name: name.to_string(),
            tag: ModuleTag::new(),
            functions: Mutex::new(Vec::new()),
            discarded: AtomicBool::new(false),
            self_weak: self_weak.clone(),
            state: Arc::clone(&self.state),
        })
    }

    /// An execution context bound to this engine instance.
    pub fn context(&self) -> ExecutionContextRef {
        Rc::new(FakeContext {
            state: Arc::clone(&self.state),
        })
    }

    /// A type registry recording declarations into this engine instance.
    pub fn type_registry(&self) -> FakeTypeRegistry {
        FakeTypeRegistry {
            state: Arc::clone(&self.state),
        }
    }

    /// Every capability call recorded so far.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Make every subsequent function invocation fail with a script
    /// exception carrying `message`.
    pub fn fail_calls(&self, message: impl Into<String>) {
        self.state().fail_calls = Some(message.into());
    }
}

/// A fake compiled unit: a named bag of functions.
pub struct FakeModule {
    name: String,
    tag: ModuleTag,
    functions: Mutex<Vec<Arc<FakeFunction>>>,
    discarded: AtomicBool,
    self_weak: Weak<FakeModule>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeModule {
    /// Declare a function in this unit with a host-provided behavior.
    pub fn add_function(
        &self,
        name: &str,
        behavior: impl Fn(&dyn EventArgs) + Send + Sync + 'static,
    ) -> ScriptFunctionRef {
        let function = Arc::new(FakeFunction {
            name: name.to_string(),
            module: self.self_weak.clone(),
            behavior: Box::new(behavior),
        });
        self.functions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&function));
        function
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded.load(Ordering::SeqCst)
    }
}

impl ScriptModule for FakeModule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn tag(&self) -> &ModuleTag {
        &self.tag
    }

    fn discard(&self) {
        if self.discarded.swap(true, Ordering::SeqCst) {
            return;
        }
        state_of(&self.state).calls.push(EngineCall::DiscardModule {
            name: self.name.clone(),
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A fake callable: a name, an owning unit, and a behavior closure.
pub struct FakeFunction {
    name: String,
    module: Weak<FakeModule>,
    behavior: Box<dyn Fn(&dyn EventArgs) + Send + Sync>,
}

impl ScriptFunction for FakeFunction {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn module(&self) -> Option<ScriptModuleRef> {
        self.module
            .upgrade()
            .map(|module| module as ScriptModuleRef)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Execution context over the fake engine: runs the behavior closure.
struct FakeContext {
    state: Arc<Mutex<FakeState>>,
}

impl ExecutionContext for FakeContext {
    fn call(
        &self,
        function: &ScriptFunctionRef,
        args: Rc<dyn EventArgs>,
    ) -> Result<(), CallError> {
        let name = function.name();
        {
            let mut state = state_of(&self.state);
            if let Some(message) = &state.fail_calls {
                return Err(CallError::Exception {
                    function: name,
                    message: message.clone(),
                });
            }
            state.calls.push(EngineCall::CallFunction { name: name.clone() });
        }
        // Lock released before running the behavior: a listener may reenter
        // the engine (nested dispatch).
        let Some(fake) = function.as_any().downcast_ref::<FakeFunction>() else {
            return Err(CallError::NotCallable { function: name });
        };
        (fake.behavior)(args.as_ref());
        Ok(())
    }
}

/// Type registry over the fake engine: records declarations, rejects
/// duplicates.
pub struct FakeTypeRegistry {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTypeRegistry {
    fn declare(&mut self, declaration: String, call: EngineCall) -> Result<(), RegisterError> {
        let mut state = state_of(&self.state);
        if state.declarations.contains(&declaration) {
            return Err(RegisterError::Duplicate { declaration });
        }
        state.declarations.push(declaration);
        state.calls.push(call);
        Ok(())
    }
}

impl TypeRegistry for FakeTypeRegistry {
    fn register_object_type(&mut self, name: &str) -> Result<(), RegisterError> {
        self.declare(
            name.to_string(),
            EngineCall::RegisterObjectType {
                name: name.to_string(),
            },
        )
    }

    fn register_funcdef(&mut self, declaration: &str) -> Result<(), RegisterError> {
        self.declare(
            declaration.to_string(),
            EngineCall::RegisterFuncdef {
                declaration: declaration.to_string(),
            },
        )
    }

    fn register_method(
        &mut self,
        type_name: &str,
        declaration: &str,
    ) -> Result<(), RegisterError> {
        self.declare(
            format!("{type_name}::{declaration}"),
            EngineCall::RegisterMethod {
                type_name: type_name.to_string(),
                declaration: declaration.to_string(),
            },
        )
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
