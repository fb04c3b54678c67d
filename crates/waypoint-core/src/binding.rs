//! Derived observables.
//!
//! A [`Binding<T>`] owns an output [`Observable<T>`] whose value is derived
//! from other observables. Two shapes are supported:
//!
//! - **Computed**: a closure recomputed whenever any declared source changes
//!   (combine-latest).
//! - **Switch-latest**: the output mirrors an inner observable selected from
//!   the value of a driver observable; whenever the driver changes, the old
//!   inner subscription is dropped and the newly selected one replayed.
//!
//! Dropping the binding disconnects it from every source.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint_core::{Binding, Observable};
//!
//! let a = Arc::new(Observable::new(true));
//! let b = Arc::new(Observable::new(false));
//!
//! let (a2, b2) = (a.clone(), b.clone());
//! let both = Binding::computed(move || a2.get() && b2.get());
//! both.depends_on(&a);
//! both.depends_on(&b);
//!
//! assert!(!both.get());
//! b.set(true);
//! assert!(both.get());
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observable::Observable;
use crate::signal::{ConnectionGuard, ConnectionId};
use crate::stream::ChangeStream;

type Compute<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// An observable value derived from other observables.
pub struct Binding<T> {
    output: Arc<Observable<T>>,
    compute: Option<Compute<T>>,
    guards: Mutex<Vec<ConnectionGuard>>,
    /// Inner connection of a switch-latest binding.
    inner: Arc<Mutex<Option<ConnectionGuard>>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Binding<T> {
    /// Create a binding whose value is `compute()`.
    ///
    /// The closure runs once immediately; declare the sources it reads with
    /// [`depends_on`](Self::depends_on) so it is re-run when they change.
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let compute: Compute<T> = Arc::new(compute);
        Self {
            output: Arc::new(Observable::new(compute())),
            compute: Some(compute),
            guards: Mutex::new(Vec::new()),
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Re-run the computation whenever `source` changes.
    ///
    /// Has no effect on switch-latest bindings.
    pub fn depends_on<S>(&self, source: &Observable<S>)
    where
        S: Clone + Send + Sync + 'static,
    {
        let Some(compute) = self.compute.clone() else {
            return;
        };
        let output = self.output.clone();
        let guard = source.changed().connect_guarded(move |_| {
            output.set(compute());
        });
        self.guards.lock().push(guard);
    }

    /// Create a switch-latest binding.
    ///
    /// `select` maps each driver value to the observable the output should
    /// mirror. It is called with the driver's current value right away and
    /// again on every driver change.
    pub fn switch_latest<D, F>(driver: &Observable<D>, select: F) -> Self
    where
        D: Clone + Send + Sync + 'static,
        F: Fn(&D) -> Arc<Observable<T>> + Send + Sync + 'static,
    {
        let first = select(&driver.get());
        let output = Arc::new(Observable::new(first.get()));
        let inner: Arc<Mutex<Option<ConnectionGuard>>> = Arc::new(Mutex::new(None));

        let slot_output = output.clone();
        let slot_inner = inner.clone();
        let driver_guard = driver.subscribe_guarded(move |value: &D| {
            // Drop the previous inner subscription before replaying the new one.
            let previous = slot_inner.lock().take();
            drop(previous);

            let source = select(value);
            let forward = slot_output.clone();
            let guard = source.subscribe_guarded(move |v: &T| {
                forward.set(v.clone());
            });
            *slot_inner.lock() = Some(guard);
        });

        Self {
            output,
            compute: None,
            guards: Mutex::new(vec![driver_guard]),
            inner,
        }
    }

    /// Current derived value.
    pub fn get(&self) -> T {
        self.output.get()
    }

    /// Recompute a computed binding immediately and return its value.
    pub fn refresh(&self) -> T {
        if let Some(compute) = &self.compute {
            self.output.set(compute());
        }
        self.output.get()
    }

    /// Subscribe to the derived value with replay of the current value.
    pub fn subscribe<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.output.subscribe(slot)
    }

    /// Remove a subscription created with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.output.unsubscribe(id)
    }

    /// The output observable.
    pub fn observable(&self) -> &Arc<Observable<T>> {
        &self.output
    }

    /// Async stream of the current value followed by every change.
    ///
    /// The stream keeps running only while the binding is alive.
    pub fn stream(&self) -> ChangeStream<T> {
        self.output.stream()
    }

    /// Number of sources this binding is connected to.
    pub fn source_count(&self) -> usize {
        self.guards.lock().len() + usize::from(self.inner.lock().is_some())
    }

    /// Disconnect from every source and close the output.
    pub fn close(&self) {
        self.guards.lock().clear();
        self.inner.lock().take();
        self.output.close();
    }
}

impl<T> Drop for Binding<T> {
    fn drop(&mut self) {
        // The driver slot holds a clone of `inner`; clear it so the inner
        // source is released even while that slot is alive.
        self.guards.get_mut().clear();
        self.inner.lock().take();
    }
}

impl<T: Clone + fmt::Debug + Send + Sync + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.output.get())
            .field("computed", &self.compute.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_binding_tracks_sources() {
        let gates: Vec<Arc<Observable<bool>>> =
            (0..3).map(|_| Arc::new(Observable::new(true))).collect();

        let watched = gates.clone();
        let all_open = Binding::computed(move || watched.iter().all(|g| g.get()));
        for gate in &gates {
            all_open.depends_on(gate);
        }
        assert!(all_open.get());
        assert_eq!(all_open.source_count(), 3);

        gates[1].set(false);
        assert!(!all_open.get());
        gates[2].set(false);
        gates[1].set(true);
        assert!(!all_open.get());
        gates[2].set(true);
        assert!(all_open.get());
    }

    #[test]
    fn test_computed_binding_notifies_subscribers() {
        let source = Arc::new(Observable::new(1));
        let src = source.clone();
        let doubled = Binding::computed(move || src.get() * 2);
        doubled.depends_on(&source);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        doubled.subscribe(move |&v| seen_clone.lock().push(v));

        source.set(5);
        assert_eq!(*seen.lock(), vec![2, 10]);
    }

    #[test]
    fn test_switch_latest_follows_driver() {
        let sources: Vec<Arc<Observable<bool>>> = vec![
            Arc::new(Observable::new(true)),
            Arc::new(Observable::new(false)),
        ];
        let driver = Observable::new(0usize);

        let pick = sources.clone();
        let current = Binding::switch_latest(&driver, move |&i| pick[i].clone());
        assert!(current.get());

        driver.set(1);
        assert!(!current.get());

        // The old source no longer drives the output
        sources[0].set(false);
        sources[0].set(true);
        assert!(!current.get());
        assert_eq!(sources[0].subscriber_count(), 0);

        sources[1].set(true);
        assert!(current.get());
    }

    #[test]
    fn test_dropping_binding_disconnects_sources() {
        let source = Arc::new(Observable::new(0));
        let driver = Observable::new(());

        {
            let src = source.clone();
            let binding = Binding::switch_latest(&driver, move |_| src.clone());
            assert_eq!(source.subscriber_count(), 1);
            assert_eq!(driver.subscriber_count(), 1);
            drop(binding);
        }

        assert_eq!(source.subscriber_count(), 0);
        assert_eq!(driver.subscriber_count(), 0);
    }
}
