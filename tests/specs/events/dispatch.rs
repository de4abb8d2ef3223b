//! Dispatch ordering specs
//!
//! Listeners run synchronously, in subscription order, whatever mix of
//! scripted and native callables an event holds.

use crate::prelude::*;
use rivet_core::DispatchError;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[test]
fn mixed_listeners_run_in_subscription_order() {
    let host = host();
    let (unit_a, _module_a) = load_module(&host, "scripts/a");
    let (unit_b, _module_b) = load_module(&host, "scripts/b");
    let log = new_log();

    let tick = host.system.event::<Tick>().unwrap();
    tick.subscribe(script_listener(&unit_a, "a_first", &log));
    tick.subscribe(native_listener("host_second", &log));
    tick.subscribe(script_listener(&unit_b, "b_third", &log));
    tick.subscribe(script_listener(&unit_a, "a_fourth", &log));

    tick.dispatch(&Tick { frame: 1 }).unwrap();

    assert_eq!(
        entries(&log),
        ["a_first", "host_second", "b_third", "a_fourth"]
    );
}

#[test]
fn listeners_see_the_payload_fields() {
    let host = host();
    let (unit, _module) = load_module(&host, "scripts");
    let seen = Arc::new(Mutex::new(0u64));

    let tick = host.system.event::<Tick>().unwrap();
    let listener = {
        let seen = Arc::clone(&seen);
        unit.add_function("on_tick", move |args| {
            if let Some(tick) = args.as_any().downcast_ref::<Tick>() {
                *seen.lock().unwrap() = tick.frame;
            }
        })
    };
    tick.subscribe(rivet_core::Callback::script(listener));

    tick.dispatch(&Tick { frame: 42 }).unwrap();
    assert_eq!(*seen.lock().unwrap(), 42);
}

#[test]
fn each_event_type_has_its_own_listener_list() {
    let host = host();
    let log = new_log();

    let tick = host.system.event::<Tick>().unwrap();
    let chat = host.system.event::<ChatMessage>().unwrap();
    tick.subscribe(native_listener("tick", &log));
    chat.subscribe(native_listener("chat", &log));

    tick.dispatch(&Tick::default()).unwrap();
    assert_eq!(entries(&log), ["tick"]);

    chat.dispatch(&ChatMessage::default()).unwrap();
    assert_eq!(entries(&log), ["tick", "chat"]);
}

#[test]
fn shared_dispatch_lets_the_host_read_results_back() {
    let host = host();
    let chat = host.system.event::<ChatMessage>().unwrap();
    chat.subscribe(rivet_core::Callback::native(|args| {
        if let Some(message) = args.as_any().downcast_ref::<ChatMessage>() {
            message.handled.set(true);
        }
    }));

    let message = Rc::new(ChatMessage {
        text: "/help".to_string(),
        ..ChatMessage::default()
    });
    chat.dispatch_shared(&message).unwrap();
    assert!(message.is_handled());
}

#[test]
fn a_scripted_fault_reaches_the_publisher() {
    let host = host();
    let (unit, _module) = load_module(&host, "scripts");
    let log = new_log();

    let tick = host.system.event::<Tick>().unwrap();
    tick.subscribe(native_listener("before", &log));
    tick.subscribe(script_listener(&unit, "boom", &log));
    tick.subscribe(native_listener("after", &log));

    host.engine.fail_calls("null pointer access");
    let err = tick.dispatch(&Tick::default()).unwrap_err();
    assert!(matches!(err, DispatchError::Call(_)));
    assert_eq!(entries(&log), ["before"]);
}
