//! Hot multicast subject with synchronous delivery

use crate::transport::Publisher;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Handler<M> = Arc<dyn Fn(&M) + Send + Sync>;

struct Handlers<M> {
    next_id: u64,
    entries: Vec<(u64, Handler<M>)>,
}

/// In-process multicast channel
///
/// `publish` invokes every handler registered at that moment, in
/// subscription order, before it returns. Late subscribers never see
/// earlier messages. Clones share the same subscriber list.
pub struct Subject<M> {
    handlers: Arc<Mutex<Handlers<M>>>,
}

impl<M: 'static> Subject<M> {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Handlers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a handler; it stays registered while the subscription lives
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&M) + Send + Sync + 'static,
    {
        let id = {
            let mut handlers = self.handlers.lock();
            let id = handlers.next_id;
            handlers.next_id += 1;
            handlers.entries.push((id, Arc::new(handler)));
            id
        };

        let weak: Weak<Mutex<Handlers<M>>> = Arc::downgrade(&self.handlers);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(handlers) = weak.upgrade() {
                    handlers.lock().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Deliver a message to the current subscribers
    ///
    /// Handlers run on the calling thread without the subscriber lock held,
    /// so they may subscribe or unsubscribe; such changes apply from the next
    /// publish on.
    pub fn publish(&self, msg: &M) -> usize {
        let snapshot: Vec<Handler<M>> = self
            .handlers
            .lock()
            .entries
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &snapshot {
            handler(msg);
        }
        snapshot.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().entries.len()
    }
}

impl<M: 'static> Default for Subject<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Subject<M> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<M> std::fmt::Debug for Subject<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("subscribers", &self.handlers.lock().entries.len())
            .finish()
    }
}

impl<M: Send + Sync + 'static> Publisher<M> for Subject<M> {
    fn publish(&self, msg: &M) -> usize {
        Subject::publish(self, msg)
    }
}

/// Handle for a registered handler
///
/// Dropping it removes the handler from its subject.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
