//! Latest-value channels.
//!
//! An [`Observable<T>`] pairs a stored value with a change [`Signal`]. It
//! always has a current value; new subscribers receive that value
//! synchronously before any live update, and setting an equal value does not
//! notify anyone.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use waypoint_core::Observable;
//!
//! let index = Observable::new(0usize);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! index.subscribe(move |&i| seen_clone.lock().push(i));
//!
//! assert!(index.set(1));
//! assert!(!index.set(1)); // unchanged, no notification
//! assert_eq!(*seen.lock(), vec![0, 1]);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::{ConnectionGuard, ConnectionId, Signal};
use crate::stream::ChangeStream;

/// A value with change notification and replay-on-subscribe.
///
/// # Thread Safety
///
/// `Observable<T>` uses interior mutability and is `Send + Sync` when `T` is.
/// It is intended for a single writer; concurrent writers may interleave
/// notifications.
pub struct Observable<T> {
    value: RwLock<T>,
    changed: Arc<Signal<T>>,
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Create a new observable with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            changed: Arc::new(Signal::new()),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// The signal emitted with every new value.
    ///
    /// Connecting to this signal directly skips the replay of the current
    /// value; use [`subscribe`](Self::subscribe) for latest-value semantics.
    pub fn changed(&self) -> &Arc<Signal<T>> {
        &self.changed
    }

    /// Subscribe to the value.
    ///
    /// The slot is invoked immediately with the current value, then with
    /// every subsequent change.
    pub fn subscribe<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let slot = Arc::new(slot);
        let (current, id) = {
            let value = self.value.read();
            let forward = slot.clone();
            let id = self.changed.connect(move |v| forward(v));
            (value.clone(), id)
        };
        slot(&current);
        id
    }

    /// Subscribe with a guard that unsubscribes when dropped.
    pub fn subscribe_guarded<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let slot = Arc::new(slot);
        let (current, guard) = {
            let value = self.value.read();
            let forward = slot.clone();
            let guard = self.changed.connect_guarded(move |v| forward(v));
            (value.clone(), guard)
        };
        slot(&current);
        guard
    }

    /// Remove a subscription created with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changed.connection_count()
    }

    /// Close the change channel.
    ///
    /// The stored value stays readable; subscribers are dropped and their
    /// streams end.
    pub fn close(&self) {
        tracing::trace!(target: targets::OBSERVABLE, "observable closed");
        self.changed.close();
    }

    /// Check whether the change channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.changed.is_closed()
    }

    /// Create an async stream that yields the current value, then every change.
    ///
    /// The stream ends when the observable is closed.
    pub fn stream(&self) -> ChangeStream<T> {
        ChangeStream::from_observable(self)
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    /// Set the value, returning `true` if it changed.
    ///
    /// Subscribers are notified only on change, after the internal lock has
    /// been released.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.write();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.changed.emit(value);
        true
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug + Send + Sync + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_observable_replays_current_value() {
        let observable = Observable::new(7);
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        observable.subscribe(move |&v| received_clone.lock().push(v));

        assert_eq!(*received.lock(), vec![7]);
    }

    #[test]
    fn test_observable_suppresses_duplicates() {
        let observable = Observable::new(true);
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        observable.subscribe(move |&v| received_clone.lock().push(v));

        assert!(!observable.set(true));
        assert!(observable.set(false));
        assert!(!observable.set(false));
        assert!(observable.set(true));

        assert_eq!(*received.lock(), vec![true, false, true]);
    }

    #[test]
    fn test_observable_unsubscribe() {
        let observable = Observable::new(0);
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = observable.subscribe(move |&v| received_clone.lock().push(v));
        observable.set(1);
        assert!(observable.unsubscribe(id));
        observable.set(2);

        assert_eq!(*received.lock(), vec![0, 1]);
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn test_observable_guarded_subscription() {
        let observable = Observable::new(0);
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _guard = observable.subscribe_guarded(move |&v| received_clone.lock().push(v));
            observable.set(1);
        }
        observable.set(2);

        assert_eq!(*received.lock(), vec![0, 1]);
    }

    #[test]
    fn test_observable_close_keeps_value() {
        let observable = Observable::new(3);
        observable.subscribe(|_| {});
        observable.close();

        assert!(observable.is_closed());
        assert_eq!(observable.subscriber_count(), 0);
        assert!(observable.set(4));
        assert_eq!(observable.get(), 4);
    }
}
