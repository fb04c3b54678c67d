//! Core systems for Waypoint.
//!
//! This crate provides the reactive building blocks used by the `waypoint`
//! wizard navigator:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Observable Values**: Latest-value channels that replay their current
//!   value to new subscribers
//! - **Bindings**: Derived observables that recompute when their sources
//!   change, including switch-latest over a changing source
//! - **Change Streams**: Async [`Stream`](futures_util::Stream) adapters over
//!   signals and observables
//!
//! # Signal/Slot Example
//!
//! ```
//! use waypoint_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Observable Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use waypoint_core::Observable;
//!
//! let enabled = Observable::new(true);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! enabled.subscribe(move |&value| seen_clone.lock().push(value));
//!
//! enabled.set(false);
//! assert_eq!(*seen.lock(), vec![true, false]);
//! ```

mod error;
pub mod binding;
pub mod logging;
pub mod observable;
pub mod signal;
pub mod stream;

pub use binding::Binding;
pub use error::{ChannelError, ChannelResult};
pub use observable::Observable;
pub use signal::{ConnectionGuard, ConnectionId, Signal, SignalEmitter};
pub use stream::ChangeStream;
