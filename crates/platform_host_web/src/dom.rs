//! RAII DOM event listeners.

use std::fmt;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget};

use crate::bridge::js_error_to_string;

/// Removes its listener from the target when dropped.
pub struct EventListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: js_sys::Function,
}

impl EventListenerGuard {
    /// Event name this guard listens for.
    pub fn event(&self) -> &'static str {
        self.event
    }
}

impl fmt::Debug for EventListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerGuard")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, &self.callback);
    }
}

/// Attaches `handler` to `target` for `event` until the returned guard is dropped.
///
/// # Errors
///
/// Returns the JS error message when the browser rejects the listener.
pub fn listen<F>(
    target: &EventTarget,
    event: &'static str,
    handler: F,
) -> Result<EventListenerGuard, String>
where
    F: FnMut(Event) + 'static,
{
    let callback: js_sys::Function = Closure::<dyn FnMut(Event)>::new(handler)
        .into_js_value()
        .unchecked_into();
    target
        .add_event_listener_with_callback(event, &callback)
        .map_err(js_error_to_string)?;
    Ok(EventListenerGuard {
        target: target.clone(),
        event,
        callback,
    })
}
