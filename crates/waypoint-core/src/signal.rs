//! Signal/slot system for Waypoint.
//!
//! Signals are emitted when state changes, and every connected slot
//! (callback) is invoked synchronously on the emitting thread. Waypoint is
//! designed for a single logical owner driving a cooperative event loop, so
//! there is no queued delivery: emission order is connection order.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//! - [`SignalEmitter`] - Type-erased view of a signal
//!
//! # Closing
//!
//! A signal can be closed with [`Signal::close`]. Closing drops every
//! connected slot and turns later emissions into no-ops. Async consumers
//! built on top of a signal (see [`crate::ChangeStream`]) observe the close
//! as the end of their stream.
//!
//! # Example
//!
//! ```
//! use waypoint_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, Key, SlotMap};

use crate::error::{ChannelError, ChannelResult};
use crate::logging::targets;
use crate::stream::ChangeStream;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// Connecting to a closed signal yields the null key, which never matches
    /// a live connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple for multiple arguments.
///
/// # Reentrancy
///
/// Slots are snapshotted before they are invoked, so a slot may connect or
/// disconnect slots (on this or any other signal) without deadlocking.
/// Changes made during an emission take effect from the next emission.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    closed: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            closed: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        if self.is_closed() {
            tracing::warn!(target: targets::SIGNAL, "connect on closed signal ignored");
            return ConnectionId::default();
        }
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Close the signal, dropping every connected slot.
    ///
    /// Closing is permanent. Later emissions are ignored and later
    /// connections are refused.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let dropped = std::mem::take(&mut *self.connections.lock());
        tracing::trace!(target: targets::SIGNAL, connection_count = dropped.len(), "signal closed");
        // Slots are dropped here, after the lock is released.
        drop(dropped);
    }

    /// Check whether the signal has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is closed, this does nothing.
    pub fn emit(&self, args: Args) {
        let _ = self.try_emit(args);
    }

    /// Emit the signal, reporting whether the signal was still open.
    ///
    /// Returns the number of slots invoked, or [`ChannelError::Closed`] once
    /// the signal has been closed.
    pub fn try_emit(&self, args: Args) -> ChannelResult<usize> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        Ok(slots.len())
    }

    /// Create an async stream of every value emitted from now on.
    ///
    /// The stream ends when the signal is closed.
    pub fn stream(self: &Arc<Self>) -> ChangeStream<Args> {
        ChangeStream::from_signal(self)
    }
}

/// Type-erased signal trait.
///
/// This allows connection guards and owners to manage a signal without
/// knowing its argument type.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect a connection by ID.
    fn disconnect(&self, id: ConnectionId) -> bool;

    /// Disconnect all connections.
    fn disconnect_all(&self);

    /// Get the number of connections.
    fn connection_count(&self) -> usize;

    /// Check whether a connection is still registered.
    fn is_connected(&self, id: ConnectionId) -> bool;

    /// Check if closed.
    fn is_closed(&self) -> bool;

    /// Close the signal.
    fn close(&self);
}

impl<Args: Clone + Send + 'static> SignalEmitter for Signal<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        Signal::disconnect(self, id)
    }

    fn disconnect_all(&self) {
        Signal::disconnect_all(self);
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().contains_key(id)
    }

    fn is_closed(&self) -> bool {
        Signal::is_closed(self)
    }

    fn close(&self) {
        Signal::close(self);
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// The guard only holds a weak reference to its signal, so it never keeps
/// the signal alive and is harmless if the signal is dropped first.
///
/// # Example
///
/// ```
/// use waypoint_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Arc::new(Signal::<i32>::new());
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_guarded(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "the connection is removed as soon as the guard is dropped"]
pub struct ConnectionGuard {
    signal: Weak<dyn SignalEmitter>,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// The guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Check whether the guarded connection is still registered.
    pub fn is_connected(&self) -> bool {
        !self.id.is_null()
            && self
                .signal
                .upgrade()
                .is_some_and(|signal| signal.is_connected(self.id))
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Connect a slot that is disconnected when the returned guard is dropped.
    pub fn connect_guarded<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let weak = Arc::downgrade(self);
        let signal: Weak<dyn SignalEmitter> = weak;
        ConnectionGuard { signal, id }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_signal_close() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(signal.try_emit(1), Ok(1));
        signal.close();
        assert!(signal.is_closed());
        assert_eq!(signal.connection_count(), 0);
        assert_eq!(signal.try_emit(2), Err(ChannelError::Closed));

        // Connecting after close is refused
        let id = signal.connect(|_| {});
        assert!(id.is_null());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_can_disconnect_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let own_id = Arc::new(Mutex::new(ConnectionId::default()));
        let calls = Arc::new(AtomicUsize::new(0));

        let signal_clone = Arc::downgrade(&signal);
        let own_id_clone = own_id.clone();
        let calls_clone = calls.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(signal) = signal_clone.upgrade() {
                signal.disconnect(*own_id_clone.lock());
            }
        });
        *own_id.lock() = id;

        signal.emit(());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_connections() {
        let signal = Signal::<String>::new();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..3 {
            let count_clone = count.clone();
            signal.connect(move |_| {
                *count_clone.lock() += 1;
            });
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit("test".to_string());
        assert_eq!(*count.lock(), 3);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let guard = signal.connect_guarded(move |&value| {
                received_clone.lock().push(value);
            });
            assert!(guard.is_connected());
            signal.emit(1);
        }

        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard_outlives_signal() {
        let signal = Arc::new(Signal::<i32>::new());
        let guard = signal.connect_guarded(|_| {});
        drop(signal);
        assert!(!guard.is_connected());
        drop(guard);
    }
}
