//! Module lifecycle specs
//!
//! Load, find, reload, and rank modules through the manager; resolve
//! engine objects back to their handles.

use crate::prelude::*;
use std::sync::Arc;

#[test]
fn loaded_modules_are_found_by_exact_name() {
    let host = host();
    let (_unit, module) = load_module(&host, "maps/arena");

    let found = host.manager.find_by_name("maps/arena").unwrap();
    assert!(Arc::ptr_eq(&found, &module));
    assert!(host.manager.find_by_name("maps/Arena").is_none());
}

#[test]
fn engine_objects_resolve_back_to_their_handle() {
    let host = host();
    let (unit, module) = load_module(&host, "scripts");
    let function = unit.add_function("on_tick", |_args| {});

    let by_unit = module_from_script_module(unit.as_ref()).unwrap();
    let by_function = module_from_script_function(function.as_ref()).unwrap();
    assert!(Arc::ptr_eq(&by_unit, &module));
    assert!(Arc::ptr_eq(&by_function, &module));
}

#[test]
fn foreign_units_resolve_to_nothing() {
    let host = host();
    // Compiled but never registered with the manager.
    let foreign = host.engine.compile_module("foreign");
    assert!(module_from_script_module(foreign.as_ref()).is_none());
}

#[test]
fn a_reloaded_module_keeps_its_rank() {
    let host = host();
    let first = host
        .manager
        .add_module(host.engine.compile_module("maps/arena"), 0x1, 50)
        .unwrap();
    let descriptor = Arc::clone(first.descriptor());

    host.manager.remove_module("maps/arena");
    let second = host
        .manager
        .add_module(host.engine.compile_module("maps/arena"), 0x2, 0)
        .unwrap();

    assert!(Arc::ptr_eq(second.descriptor(), &descriptor));
    assert_eq!(second.descriptor().priority(), 50);
}

#[test]
fn modules_rank_by_priority_then_load_order() {
    let host = host();
    host.manager
        .add_module(host.engine.compile_module("late"), 0, 0)
        .unwrap();
    host.manager
        .add_module(host.engine.compile_module("urgent"), 0, 9)
        .unwrap();
    host.manager
        .add_module(host.engine.compile_module("early"), 0, 0)
        .unwrap();

    let names: Vec<_> = host
        .manager
        .modules_by_rank()
        .iter()
        .map(|module| module.name())
        .collect();
    assert_eq!(names, ["urgent", "late", "early"]);
}
