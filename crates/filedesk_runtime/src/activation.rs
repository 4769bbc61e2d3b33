//! Page-activation broadcast: the router's only handoff to the page handlers.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::model::PageActivation;

type Listener = Rc<dyn Fn(&PageActivation)>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Clone, Default)]
/// Broadcasts [`PageActivation`] events to every live subscription.
pub struct ActivationBus {
    state: Rc<RefCell<BusState>>,
}

impl fmt::Debug for ActivationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ActivationBus {
    /// Registers `listener` until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&PageActivation) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.state),
        }
    }

    /// Delivers `activation` to the listeners registered at the time of the call.
    pub fn emit(&self, activation: &PageActivation) {
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(activation);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Unsubscribes from the [`ActivationBus`] when dropped.
pub struct Subscription {
    id: u64,
    bus: std::rc::Weak<RefCell<BusState>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.bus.upgrade() {
            state
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PageName;

    fn activation(page: &str) -> PageActivation {
        PageActivation {
            page: PageName::new(page),
        }
    }

    #[test]
    fn every_subscriber_sees_each_activation() {
        let bus = ActivationBus::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = seen.clone();
        let second = seen.clone();
        let _a = bus.subscribe(move |event| first.borrow_mut().push(format!("a:{}", event.page)));
        let _b = bus.subscribe(move |event| second.borrow_mut().push(format!("b:{}", event.page)));

        bus.emit(&activation("stats"));

        assert_eq!(*seen.borrow(), vec!["a:stats", "b:stats"]);
    }

    #[test]
    fn dropped_subscription_stops_receiving() {
        let bus = ActivationBus::default();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let subscription = bus.subscribe(move |_| *counter.borrow_mut() += 1);

        bus.emit(&activation("myfile"));
        drop(subscription);
        bus.emit(&activation("myfile"));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_emit() {
        let bus = ActivationBus::default();
        let late = Rc::new(RefCell::new(Vec::new()));
        let inner_bus = bus.clone();
        let sink = late.clone();
        let _outer = bus.subscribe(move |_| {
            let sink = sink.clone();
            std::mem::forget(inner_bus.subscribe(move |event| {
                sink.borrow_mut().push(event.page.clone());
            }));
        });

        bus.emit(&activation("upload"));

        assert!(late.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 2);
    }
}
