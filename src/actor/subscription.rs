//! Subscriber bookkeeping for snapshot broadcasts.

use crate::core::Snapshot;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type SubscriberFn = Rc<dyn Fn(&Snapshot)>;
type SubscriberList = Rc<RefCell<Vec<(u64, SubscriberFn)>>>;

/// Ordered subscriber list with re-entrancy-safe notification.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: SubscriberList,
    next_id: Cell<u64>,
}

impl Subscribers {
    pub(crate) fn add<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        Subscription {
            entries: Rc::downgrade(&self.entries),
            id,
        }
    }

    /// Notify every subscriber, in subscription order.
    ///
    /// Works over a copy of the list taken at broadcast start: callbacks may
    /// subscribe, unsubscribe, or send re-entrantly, and those structural
    /// changes take effect on the next broadcast.
    pub(crate) fn notify(&self, snapshot: &Snapshot) {
        let entries: Vec<(u64, SubscriberFn)> = self.entries.borrow().clone();
        for (_, callback) in &entries {
            callback(snapshot);
        }
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Handle returned by `subscribe`; detaches the callback when consumed.
///
/// Dropping the handle does not unsubscribe: the callback stays live until
/// [`Subscription::unsubscribe`] is called or the actor stops.
pub struct Subscription {
    entries: Weak<RefCell<Vec<(u64, SubscriberFn)>>>,
    id: u64,
}

impl Subscription {
    /// Remove this registration. Each subscription is independent: removing
    /// one leaves other registrations of the same callback untouched.
    pub fn unsubscribe(self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
