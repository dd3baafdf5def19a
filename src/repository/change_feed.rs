use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::product::ProductId;

/// A committed change to the product collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Created(ProductId),
    Updated(ProductId),
    /// Ids that were actually removed; ids that were already gone are not listed.
    Deleted(Vec<ProductId>),
}

/// Handle returned by [`ChangeFeed::on`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Synchronous fan-out of [`ChangeEvent`]s to registered listeners.
///
/// Listeners run on the caller's thread, in registration order, after the store
/// write has completed. The listener set is copied before delivery, so a listener
/// may subscribe or unsubscribe; such changes apply from the next event. Clones
/// share the same listener set.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    listeners: Arc<RwLock<BTreeMap<SubscriptionId, Listener>>>,
    next_id: Arc<AtomicU64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.insert(id, Arc::new(listener));
        }
        id
    }

    /// Returns true if the listener was registered.
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.listeners
            .write()
            .map(|mut listeners| listeners.remove(&id).is_some())
            .unwrap_or(false)
    }

    pub fn emit(&self, event: &ChangeEvent) {
        let listeners: Vec<Listener> = match self.listeners.read() {
            Ok(listeners) => listeners.values().cloned().collect(),
            Err(_) => return,
        };

        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }
}
