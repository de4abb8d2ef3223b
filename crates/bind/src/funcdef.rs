// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler funcdef synthesis

/// The callable-type declaration for handlers of an event class.
///
/// Fixed naming convention: the handler type of `Frame` is `FrameHandler`,
/// taking the event object and returning nothing. Scripted and native
/// listeners are both stored under this shape.
pub fn format_event_handler_funcdef(class_name: &str) -> String {
    format!("void {class_name}Handler({class_name}@ args)")
}

#[cfg(test)]
#[path = "funcdef_tests.rs"]
mod tests;
