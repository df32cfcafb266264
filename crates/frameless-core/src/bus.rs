//! Change notification bus for the window catalog.
//!
//! The bus owns the canonical "current windows" snapshot. A refresh
//! enumerates into a local value, swaps it in under the lock, then
//! hands the same snapshot to every active subscription outside the
//! lock.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::{Window, WindowSource};

/// An immutable point-in-time list of windows.
///
/// Cloning is cheap: the list is shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    windows: Arc<[Window]>,
}

impl Snapshot {
    /// Monotonic refresh counter. Zero means "never published".
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            generation: 0,
            windows: Arc::from(Vec::new()),
        }
    }
}

impl Deref for Snapshot {
    type Target = [Window];

    fn deref(&self) -> &[Window] {
        &self.windows
    }
}

type Callback = Box<dyn FnMut(&Snapshot) + Send>;

/// Handle for one registered callback. Pass it back to
/// [`WindowBus::unsubscribe`] to cancel.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
}

struct Delivery {
    callback: Callback,
    last_generation: u64,
}

struct Subscriber {
    id: u64,
    active: AtomicBool,
    // Held for the whole callback so deliveries to one subscription
    // never overlap.
    delivery: Mutex<Delivery>,
    delivering_on: Mutex<Option<ThreadId>>,
}

impl Subscriber {
    fn deliver(&self, snapshot: &Snapshot) {
        let mut delivery = lock(&self.delivery);
        if !self.active.load(Ordering::SeqCst) || snapshot.generation <= delivery.last_generation {
            return;
        }
        delivery.last_generation = snapshot.generation;

        *lock(&self.delivering_on) = Some(thread::current().id());
        (delivery.callback)(snapshot);
        *lock(&self.delivering_on) = None;
    }
}

/// Republishes the window catalog to any number of subscribers.
pub struct WindowBus {
    current: Mutex<Snapshot>,
    subscribers: Mutex<Vec<Arc<Subscriber>>>,
    next_id: AtomicU64,
}

impl Default for WindowBus {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBus {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Snapshot::default()),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the latest published snapshot.
    pub fn current(&self) -> Snapshot {
        lock(&self.current).clone()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    /// Registers a callback for future snapshots.
    ///
    /// Nothing is delivered until the next refresh publishes. Callbacks
    /// run on the refreshing thread and must return quickly; they must
    /// not call [`WindowBus::refresh`] or [`WindowBus::publish`].
    pub fn subscribe(&self, callback: impl FnMut(&Snapshot) + Send + 'static) -> Subscription {
        self.register(Box::new(callback)).0
    }

    /// Like [`WindowBus::subscribe`], but immediately delivers the
    /// current snapshot if one has been published.
    pub fn subscribe_with_current(
        &self,
        callback: impl FnMut(&Snapshot) + Send + 'static,
    ) -> Subscription {
        let (subscription, subscriber) = self.register(Box::new(callback));
        let current = self.current();
        if current.generation > 0 {
            subscriber.deliver(&current);
        }
        subscription
    }

    fn register(&self, callback: Callback) -> (Subscription, Arc<Subscriber>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let subscriber = Arc::new(Subscriber {
            id,
            active: AtomicBool::new(true),
            delivery: Mutex::new(Delivery {
                callback,
                last_generation: 0,
            }),
            delivering_on: Mutex::new(None),
        });
        lock(&self.subscribers).push(subscriber.clone());
        crate::log_debug!("bus: subscription {id} registered");
        (Subscription { id }, subscriber)
    }

    /// Cancels a subscription.
    ///
    /// Once this returns no new delivery to it will start. A delivery
    /// already running on another thread is waited for, not
    /// interrupted. Calling this from inside the subscription's own
    /// callback is allowed.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let removed = {
            let mut subscribers = lock(&self.subscribers);
            subscribers
                .iter()
                .position(|s| s.id == subscription.id)
                .map(|i| subscribers.remove(i))
        };
        let Some(subscriber) = removed else {
            return;
        };
        subscriber.active.store(false, Ordering::SeqCst);

        let inside_own_callback = *lock(&subscriber.delivering_on) == Some(thread::current().id());
        if !inside_own_callback {
            drop(lock(&subscriber.delivery));
        }
        crate::log_debug!("bus: subscription {} cancelled", subscription.id);
    }

    /// Enumerates `source` and publishes the result.
    ///
    /// The snapshot lock is not held while enumerating. Returns whether
    /// a new snapshot was published.
    pub fn refresh(&self, source: &impl WindowSource) -> bool {
        let windows = source.enumerate();
        self.publish(windows)
    }

    /// Replaces the current snapshot and delivers it to every subscriber.
    ///
    /// An empty list is treated as a transient enumeration failure: it
    /// is dropped and the previous snapshot stays in place.
    pub fn publish(&self, windows: Vec<Window>) -> bool {
        if windows.is_empty() {
            crate::log_debug!("bus: empty refresh ignored");
            return false;
        }

        let snapshot = {
            let mut current = lock(&self.current);
            let snapshot = Snapshot {
                generation: current.generation + 1,
                windows: windows.into(),
            };
            *current = snapshot.clone();
            snapshot
        };

        let subscribers: Vec<Arc<Subscriber>> = lock(&self.subscribers).clone();
        for subscriber in &subscribers {
            subscriber.deliver(&snapshot);
        }
        true
    }
}

/// Locks a mutex, recovering the data if a callback panicked while
/// holding it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
