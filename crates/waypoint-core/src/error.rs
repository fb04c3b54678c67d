//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by signals and observables.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel has been closed and no longer delivers values.
    #[error("channel has been closed")]
    Closed,
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;
