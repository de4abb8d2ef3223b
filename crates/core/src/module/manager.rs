// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of live module handles and their descriptors

use super::descriptor::ModuleDescriptor;
use super::handle::Module;
use crate::engine::ScriptModuleRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors from the module registry.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module already registered: {0}")]
    DuplicateName(String),
}

/// Registry of live module handles.
///
/// Handles are kept in insertion order and found by exact name equality.
/// Descriptors live in their own name-keyed registry and are never removed:
/// a handle may outlive its removal from the manager, and a reloaded module
/// reuses its predecessor's descriptor (and with it, its rank).
#[derive(Debug, Default)]
pub struct ModuleManager {
    descriptors: Mutex<HashMap<String, Arc<ModuleDescriptor>>>,
    modules: Mutex<Vec<Arc<Module>>>,
}

impl ModuleManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn descriptor_table(&self) -> MutexGuard<'_, HashMap<String, Arc<ModuleDescriptor>>> {
        self.descriptors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn module_table(&self) -> MutexGuard<'_, Vec<Arc<Module>>> {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The descriptor registered under `name`, created on first use.
    ///
    /// An existing descriptor keeps its original access mask and priority;
    /// later arguments are ignored so a reload cannot silently change rank.
    pub fn descriptor_for(
        &self,
        name: &str,
        access_mask: u32,
        priority: i32,
    ) -> Arc<ModuleDescriptor> {
        let mut descriptors = self.descriptor_table();
        Arc::clone(
            descriptors
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(ModuleDescriptor::new(name, access_mask, priority))),
        )
    }

    /// Wrap a freshly compiled unit and register the handle.
    ///
    /// One live handle per name; unload the old module before loading its
    /// replacement.
    pub fn add_module(
        &self,
        script_module: ScriptModuleRef,
        access_mask: u32,
        priority: i32,
    ) -> Result<Arc<Module>, ModuleError> {
        let name = script_module.name();
        if self.find_by_name(&name).is_some() {
            return Err(ModuleError::DuplicateName(name));
        }
        let descriptor = self.descriptor_for(&name, access_mask, priority);
        let module = Module::new(script_module, descriptor);
        self.module_table().push(Arc::clone(&module));
        tracing::info!(module = %name, "module registered");
        Ok(module)
    }

    /// The live handle registered under `name`, if any.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Module>> {
        self.module_table()
            .iter()
            .find(|module| module.name_matches(name))
            .cloned()
    }

    /// Discard the named module and drop it from the registry.
    ///
    /// Returns the discarded handle so the host can purge its listeners
    /// from the event system; `None` if no such module is registered.
    pub fn remove_module(&self, name: &str) -> Option<Arc<Module>> {
        let module = {
            let mut modules = self.module_table();
            let index = modules.iter().position(|module| module.name_matches(name))?;
            modules.remove(index)
        };
        module.discard();
        Some(module)
    }

    /// Discard every registered module, returning the handles in their
    /// former insertion order.
    pub fn remove_all(&self) -> Vec<Arc<Module>> {
        let modules: Vec<_> = self.module_table().drain(..).collect();
        for module in &modules {
            module.discard();
        }
        modules
    }

    /// Live handles sorted by [`Module::total_order`].
    pub fn modules_by_rank(&self) -> Vec<Arc<Module>> {
        let mut modules = self.module_table().clone();
        modules.sort_by(Module::total_order);
        modules
    }

    pub fn module_count(&self) -> usize {
        self.module_table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.module_table().is_empty()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
