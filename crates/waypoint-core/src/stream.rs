//! Async stream adapters over signals and observables.
//!
//! A [`ChangeStream`] forwards values from a synchronous slot into an
//! unbounded channel. Dropping the stream disconnects the slot; closing the
//! source drops the slot, which ends the stream gracefully.
//!
//! # Example
//!
//! ```
//! use futures_util::StreamExt;
//! use waypoint_core::Observable;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let observable = Observable::new(1);
//! let mut changes = observable.stream();
//!
//! observable.set(2);
//! observable.close();
//!
//! assert_eq!(changes.next().await, Some(1));
//! assert_eq!(changes.next().await, Some(2));
//! assert_eq!(changes.next().await, None);
//! # });
//! ```

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::observable::Observable;
use crate::signal::{ConnectionGuard, Signal};

/// An async stream of values delivered by a signal or observable.
#[must_use = "streams do nothing unless polled"]
pub struct ChangeStream<T> {
    inner: UnboundedReceiverStream<T>,
    _guard: ConnectionGuard,
}

impl<T: Clone + Send + 'static> ChangeStream<T> {
    /// Stream every value emitted by `signal` from now on.
    pub(crate) fn from_signal(signal: &Arc<Signal<T>>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let guard = signal.connect_guarded(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        Self {
            inner: UnboundedReceiverStream::new(rx),
            _guard: guard,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ChangeStream<T> {
    /// Stream the current value of `observable`, then every change.
    pub(crate) fn from_observable(observable: &Observable<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let guard = observable.subscribe_guarded(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        Self {
            inner: UnboundedReceiverStream::new(rx),
            _guard: guard,
        }
    }
}

impl<T> Stream for ChangeStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> std::fmt::Debug for ChangeStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeStream").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_signal_stream_is_live_only() {
        let signal = Arc::new(Signal::<u32>::new());
        signal.emit(1);

        let mut stream = signal.stream();
        signal.emit(2);
        signal.emit(3);
        signal.close();

        let values: Vec<u32> = stream.by_ref().collect().await;
        assert_eq!(values, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_observable_stream_replays_then_follows() {
        let observable = Observable::new(false);
        let mut stream = observable.stream();

        observable.set(true);
        assert_eq!(stream.next().await, Some(false));
        assert_eq!(stream.next().await, Some(true));

        observable.close();
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_dropping_stream_disconnects() {
        let signal = Arc::new(Signal::<u32>::new());
        let stream = signal.stream();
        assert_eq!(signal.connection_count(), 1);
        drop(stream);
        assert_eq!(signal.connection_count(), 0);
    }
}
