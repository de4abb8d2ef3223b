// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reference-counted handle around an engine-owned compiled unit

use super::descriptor::ModuleDescriptor;
use crate::engine::ScriptModuleRef;
use crate::id::HandleId;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A handle wrapping the engine's compiled unit together with its
/// descriptor.
///
/// Shared as `Arc<Module>`: the engine may touch module lifetime from worker
/// contexts, so the count is atomic even though events are single-threaded.
/// The handle outlives the engine-side unit once discarded; holders then see
/// the detached state instead of a dangling unit.
pub struct Module {
    script_module: Mutex<Option<ScriptModuleRef>>,
    descriptor: Arc<ModuleDescriptor>,
    handle_id: HandleId,
}

impl Module {
    /// Wrap a freshly compiled unit.
    ///
    /// Attaches the reverse-lookup tag to the engine object, so callables
    /// from this unit resolve back to the handle until discard. The
    /// descriptor is shared, not owned; its registry outlives the handle.
    pub fn new(script_module: ScriptModuleRef, descriptor: Arc<ModuleDescriptor>) -> Arc<Self> {
        let handle = Arc::new(Self {
            script_module: Mutex::new(Some(Arc::clone(&script_module))),
            descriptor,
            handle_id: HandleId::next(),
        });
        script_module.tag().attach(Arc::downgrade(&handle));
        handle
    }

    fn unit(&self) -> MutexGuard<'_, Option<ScriptModuleRef>> {
        self.script_module
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The wrapped compiled unit, or `None` once discarded.
    pub fn script_module(&self) -> Option<ScriptModuleRef> {
        self.unit().clone()
    }

    /// The unit's name while attached, the descriptor's after discard.
    pub fn name(&self) -> String {
        self.unit()
            .as_ref()
            .map_or_else(|| self.descriptor.name().to_string(), |unit| unit.name())
    }

    pub fn descriptor(&self) -> &Arc<ModuleDescriptor> {
        &self.descriptor
    }

    pub fn handle_id(&self) -> HandleId {
        self.handle_id
    }

    pub fn is_discarded(&self) -> bool {
        self.unit().is_none()
    }

    /// Detach from the compiled unit and unload it through the engine.
    ///
    /// Teardown runs once: the reverse-lookup tag is cleared first, so
    /// lookups racing the discard report absence rather than a dying unit.
    /// Further calls are no-ops.
    pub fn discard(&self) {
        let Some(unit) = self.unit().take() else {
            return;
        };
        unit.tag().clear();
        unit.discard();
        tracing::info!(module = %self.descriptor.name(), "module discarded");
    }

    /// Total order over handles: descriptor rank first, handle identity as
    /// the tie-break.
    ///
    /// Strict weak ordering even when two handles share a descriptor (a
    /// reload overlapping its predecessor), which descriptor content alone
    /// cannot provide.
    pub fn total_order(a: &Arc<Module>, b: &Arc<Module>) -> Ordering {
        a.descriptor
            .cmp(&b.descriptor)
            .then_with(|| a.handle_id.cmp(&b.handle_id))
    }

    /// Exact name equality, for insertion-ordered registries.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name() == name
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name())
            .field("handle_id", &self.handle_id)
            .field("discarded", &self.is_discarded())
            .finish()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
