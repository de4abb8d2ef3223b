// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reverse lookup from engine-owned objects to their owning handle

use super::handle::Module;
use crate::engine::{ScriptFunction, ScriptModule};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// The user-data slot a compiled unit carries for reverse lookup.
///
/// Attached when a [`Module`] wraps the unit, cleared at discard; a lookup
/// after discard reports absence instead of a dangling handle. The back
/// reference is weak, so the tag never keeps a handle alive on its own.
#[derive(Debug, Default)]
pub struct ModuleTag {
    owner: Mutex<Option<Weak<Module>>>,
}

impl ModuleTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, owner: Weak<Module>) {
        let mut slot = self.owner.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(owner);
    }

    pub(crate) fn clear(&self) {
        let mut slot = self.owner.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    fn owner(&self) -> Option<Arc<Module>> {
        let slot = self.owner.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().and_then(Weak::upgrade)
    }
}

/// The handle owning a compiled unit, or `None` for untagged, foreign, or
/// discarded units.
pub fn module_from_script_module(script_module: &dyn ScriptModule) -> Option<Arc<Module>> {
    script_module.tag().owner()
}

/// The handle owning the unit a callable was declared in, or `None` for
/// module-less callables and for callables whose unit was discarded.
pub fn module_from_script_function(function: &dyn ScriptFunction) -> Option<Arc<Module>> {
    let owner = function.module()?;
    module_from_script_module(owner.as_ref())
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
