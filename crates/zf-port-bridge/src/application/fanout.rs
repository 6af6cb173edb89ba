//! Named multi-subscriber event dispatch.
//!
//! The wrapper's event target is duck typed on the wire; here it becomes an
//! explicit dispatcher keyed by [`EventName`].  Multiple listeners per name
//! are independent: each dispatch calls every currently registered listener
//! for that name, synchronously and in registration order, and one listener's
//! failure never stops the others.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};
use zf_core::EventName;

use crate::application::error::BridgeError;

/// A registered event listener.
///
/// Listeners receive the full push-event message and either succeed or
/// report a [`BridgeError`].  Sends to host ports happen inside listeners and
/// are non-blocking, so dispatch never suspends.
pub type Listener = Box<dyn FnMut(&Value) -> Result<(), BridgeError> + Send>;

/// Registers one-to-many listeners per event name and re-broadcasts incoming
/// named events to all of them.
pub struct EventFanout {
    listeners: HashMap<EventName, Vec<Listener>>,
}

impl EventFanout {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Registers `listener` under `name`, after any listener already there.
    pub fn subscribe<F>(&mut self, name: EventName, listener: F)
    where
        F: FnMut(&Value) -> Result<(), BridgeError> + Send + 'static,
    {
        self.listeners
            .entry(name)
            .or_default()
            .push(Box::new(listener));
    }

    /// Removes every listener registered under `name`, returning how many
    /// were dropped.
    ///
    /// Current wiring never unsubscribes (listeners live for the bridge's
    /// single lifetime), but removal exists so embedders can rewire.
    pub fn unsubscribe_all(&mut self, name: &EventName) -> usize {
        self.listeners.remove(name).map_or(0, |l| l.len())
    }

    /// Number of listeners currently registered under `name`.
    pub fn listener_count(&self, name: &EventName) -> usize {
        self.listeners.get(name).map_or(0, |l| l.len())
    }

    /// Delivers one event to every listener registered for `name`.
    ///
    /// Listeners run in registration order.  A failing listener is logged and
    /// skipped over — isolation first — and the *first* failure is returned
    /// after all listeners have run, so faults that must surface (malformed
    /// navigation, for one) still propagate to the pump.
    ///
    /// An event with no listeners is a logged no-op: events dispatched before
    /// anyone subscribes are simply never seen, by design.
    pub fn dispatch(&mut self, name: &EventName, detail: &Value) -> Result<(), BridgeError> {
        let Some(listeners) = self.listeners.get_mut(name) else {
            debug!(event = %name, "no listeners registered; event dropped");
            return Ok(());
        };

        let mut first_error = None;
        for listener in listeners.iter_mut() {
            if let Err(e) = listener(detail) {
                warn!(event = %name, error = %e, "listener failed; continuing fanout");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for EventFanout {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Listener that appends `tag` to a shared log on every call.
    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> Listener {
        let log = Arc::clone(log);
        Box::new(move |_| {
            log.lock().unwrap().push(tag);
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_calls_listeners_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut fanout = EventFanout::new();
        fanout.subscribe(EventName::SetSiteInfo, recording(&log, "first"));
        fanout.subscribe(EventName::SetSiteInfo, recording(&log, "second"));

        fanout.dispatch(&EventName::SetSiteInfo, &json!({})).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_failing_listener_does_not_stop_the_next_one() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut fanout = EventFanout::new();
        fanout.subscribe(EventName::SetSiteInfo, |_| {
            Err(BridgeError::MalformedNavigation {
                reason: "boom".to_string(),
            })
        });
        fanout.subscribe(EventName::SetSiteInfo, recording(&log, "survivor"));

        let result = fanout.dispatch(&EventName::SetSiteInfo, &json!({}));

        // The second listener still ran, and the first failure is returned.
        assert_eq!(*log.lock().unwrap(), vec!["survivor"]);
        assert!(matches!(
            result,
            Err(BridgeError::MalformedNavigation { .. })
        ));
    }

    #[test]
    fn test_dispatch_only_reaches_listeners_for_that_name() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut fanout = EventFanout::new();
        fanout.subscribe(EventName::SetSiteInfo, recording(&log, "info"));
        fanout.subscribe(EventName::PopState, recording(&log, "pop"));

        fanout.dispatch(&EventName::PopState, &json!({})).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["pop"]);
    }

    #[test]
    fn test_dispatch_with_no_listeners_is_a_no_op() {
        let mut fanout = EventFanout::new();
        fanout
            .dispatch(&EventName::Other("announcerInfo".to_string()), &json!({}))
            .unwrap();
    }

    #[test]
    fn test_listener_receives_the_detail_value() {
        let seen = Arc::new(Mutex::new(None));
        let mut fanout = EventFanout::new();
        fanout.subscribe(EventName::SetSiteInfo, {
            let seen = Arc::clone(&seen);
            move |detail: &Value| {
                *seen.lock().unwrap() = Some(detail.clone());
                Ok(())
            }
        });

        fanout
            .dispatch(&EventName::SetSiteInfo, &json!({"params": {"peers": 4}}))
            .unwrap();

        assert_eq!(
            seen.lock().unwrap().take(),
            Some(json!({"params": {"peers": 4}}))
        );
    }

    #[test]
    fn test_unsubscribe_all_removes_listeners() {
        let mut fanout = EventFanout::new();
        fanout.subscribe(EventName::Ready, |_| Ok(()));
        fanout.subscribe(EventName::Ready, |_| Ok(()));

        assert_eq!(fanout.listener_count(&EventName::Ready), 2);
        assert_eq!(fanout.unsubscribe_all(&EventName::Ready), 2);
        assert_eq!(fanout.listener_count(&EventName::Ready), 0);
    }
}
