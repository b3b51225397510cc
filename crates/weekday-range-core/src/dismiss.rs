//! Outside-click dismissal.
//!
//! A [`DismissHub`] stands in for the document-level click listener list. An
//! open picker holds a [`DismissSubscription`]; dropping the subscription
//! removes the listener, so it is released no matter how the picker closes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    active: Vec<(u64, Rc<Cell<bool>>)>,
}

#[derive(Debug, Clone, Default)]
pub struct DismissHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl DismissHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener that lives as long as the returned guard.
    pub fn subscribe(&self) -> DismissSubscription {
        let flag = Rc::new(Cell::new(false));
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.active.push((id, Rc::clone(&flag)));
        DismissSubscription {
            id,
            dismissed: flag,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Dispatch a click that landed outside every open picker.
    /// Returns the number of listeners notified.
    pub fn click_outside(&self) -> usize {
        let listeners = self.listeners.borrow();
        for (_, flag) in &listeners.active {
            flag.set(true);
        }
        listeners.active.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().active.len()
    }
}

#[derive(Debug)]
pub struct DismissSubscription {
    id: u64,
    dismissed: Rc<Cell<bool>>,
    listeners: Weak<RefCell<Listeners>>,
}

impl DismissSubscription {
    /// True once an outside click has been dispatched since subscribing.
    pub fn is_dismissed(&self) -> bool {
        self.dismissed.get()
    }
}

impl Drop for DismissSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().active.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_released_on_drop() {
        let hub = DismissHub::new();
        let sub = hub.subscribe();
        assert_eq!(hub.listener_count(), 1);
        drop(sub);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn outside_click_marks_live_subscriptions() {
        let hub = DismissHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        assert!(!first.is_dismissed());

        assert_eq!(hub.click_outside(), 2);
        assert!(first.is_dismissed());
        assert!(second.is_dismissed());
    }

    #[test]
    fn later_subscription_not_affected_by_earlier_click() {
        let hub = DismissHub::new();
        assert_eq!(hub.click_outside(), 0);
        let sub = hub.subscribe();
        assert!(!sub.is_dismissed());
    }

    #[test]
    fn dropping_one_keeps_the_other() {
        let hub = DismissHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        drop(first);
        assert_eq!(hub.listener_count(), 1);
        hub.click_outside();
        assert!(second.is_dismissed());
    }

    #[test]
    fn subscription_outlives_hub() {
        let hub = DismissHub::new();
        let sub = hub.subscribe();
        drop(hub);
        assert!(!sub.is_dismissed());
        drop(sub);
    }
}
