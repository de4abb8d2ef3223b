//! Registration specs
//!
//! The engine's reflection system sees the event classes, their handler
//! funcdefs, and the script-facing subscription surface.

use crate::prelude::*;
use rivet_bind::{
    format_event_handler_funcdef, register_event_api, subscribe_script_listener,
    unsubscribe_script_listener,
};

#[test]
fn host_setup_declares_types_and_funcdefs() {
    let host = host();
    let calls = host.engine.calls();

    assert!(calls.contains(&EngineCall::RegisterObjectType {
        name: "Tick".to_string()
    }));
    assert!(calls.contains(&EngineCall::RegisterFuncdef {
        declaration: "void TickHandler(Tick@ args)".to_string()
    }));
    assert!(calls.contains(&EngineCall::RegisterFuncdef {
        declaration: "void ChatMessageHandler(ChatMessage@ args)".to_string()
    }));
    // Only the preemptable class gets the property accessors.
    assert!(calls.contains(&EngineCall::RegisterMethod {
        type_name: "ChatMessage".to_string(),
        declaration: "bool get_Handled() const property".to_string(),
    }));
    assert!(!calls.iter().any(|call| matches!(
        call,
        EngineCall::RegisterMethod { type_name, .. } if type_name == "Tick"
    )));
}

#[test]
fn funcdef_synthesis_matches_the_registered_declaration() {
    assert_eq!(
        format_event_handler_funcdef("Tick"),
        "void TickHandler(Tick@ args)"
    );
}

#[test]
fn event_api_registration_declares_the_script_surface() {
    let host = host();
    let mut types = host.engine.type_registry();
    register_event_api(&mut types).unwrap();

    let calls = host.engine.calls();
    assert!(calls.contains(&EngineCall::RegisterMethod {
        type_name: "Event".to_string(),
        declaration: "void Subscribe(?&in handler)".to_string(),
    }));
    assert!(calls.contains(&EngineCall::RegisterMethod {
        type_name: "Event".to_string(),
        declaration: "void Unsubscribe(?&in handler)".to_string(),
    }));
}

#[test]
fn scripts_subscribe_through_the_name_keyed_accessor() {
    let host = host();
    let (unit, _module) = load_module(&host, "scripts");
    let log = new_log();

    let function = {
        let log = log.clone();
        unit.add_function("on_tick", move |_args| {
            log.lock().unwrap().push("scripted".to_string());
        })
    };

    assert!(subscribe_script_listener(&host.system, "Tick", function.clone()));
    assert!(!subscribe_script_listener(
        &host.system,
        "NoSuchEvent",
        function.clone()
    ));

    let tick = host.system.event::<Tick>().unwrap();
    tick.dispatch(&Tick::default()).unwrap();
    assert_eq!(entries(&log), ["scripted"]);

    assert!(unsubscribe_script_listener(&host.system, "Tick", &function));
    tick.dispatch(&Tick::default()).unwrap();
    assert_eq!(entries(&log), ["scripted"]);
}
