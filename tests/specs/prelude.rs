//! Shared harness for the behavioral specs
//!
//! `Host` bundles what an embedding application holds: the engine, the
//! event system built from the registered event classes, and the module
//! manager.

#![allow(dead_code)]

use rivet_bind::{register_event_class, register_preemptable_event_class};
use std::any::Any;
use std::sync::{Arc, Mutex};

// Re-exported so every spec module shares one import surface.
pub use rivet_core::{
    module_from_script_function, module_from_script_module, Callback, DispatchError, EngineCall,
    EventArgs, EventRegistry, EventSystem, FakeEngine, FakeModule, Handled, Module, ModuleManager,
    Preemptable,
};

/// Per-frame housekeeping payload; not preemptable.
#[derive(Clone, Default)]
pub struct Tick {
    pub frame: u64,
}

impl EventArgs for Tick {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Chat payload; a listener may consume it before the rest see it.
#[derive(Clone, Default)]
pub struct ChatMessage {
    pub text: String,
    pub handled: Handled,
}

impl EventArgs for ChatMessage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn handled(&self) -> Option<&Handled> {
        Some(&self.handled)
    }
}

impl Preemptable for ChatMessage {}

pub struct Host {
    pub engine: FakeEngine,
    pub system: EventSystem,
    pub manager: ModuleManager,
}

/// A host with `Tick` and `ChatMessage` registered.
pub fn host() -> Host {
    let engine = FakeEngine::new();
    let mut types = engine.type_registry();
    let mut events = EventRegistry::new();
    register_event_class::<Tick>(&mut types, &mut events, "Tick").unwrap();
    register_preemptable_event_class::<ChatMessage>(&mut types, &mut events, "ChatMessage")
        .unwrap();
    let system = EventSystem::new(&events, engine.context());
    Host {
        engine,
        system,
        manager: ModuleManager::new(),
    }
}

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A scripted listener that logs its label when invoked.
pub fn script_listener(unit: &Arc<FakeModule>, name: &str, log: &Log) -> Callback {
    let log = Arc::clone(log);
    let label = name.to_string();
    Callback::script(unit.add_function(name, move |_args| {
        log.lock().unwrap().push(label.clone());
    }))
}

/// A native listener that logs its label when invoked.
pub fn native_listener(name: &str, log: &Log) -> Callback {
    let log = Arc::clone(log);
    let label = name.to_string();
    Callback::native(move |_args| log.lock().unwrap().push(label.clone()))
}

/// Compile a unit and register it with the host's module manager.
pub fn load_module(host: &Host, name: &str) -> (Arc<FakeModule>, Arc<Module>) {
    let unit = host.engine.compile_module(name);
    let module = host.manager.add_module(unit.clone(), 0, 0).unwrap();
    (unit, module)
}
