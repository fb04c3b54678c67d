//! Error types for wizard navigation.

use thiserror::Error;
use waypoint_core::ChannelError;

/// Errors that can occur while building or driving a wizard.
///
/// Guarded no-ops (going next from the last step, going to the current step,
/// a closed gate) are not errors: the operation returns `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A step index outside `0..len` was passed to an operation.
    #[error("step index {index} out of range for a wizard with {len} steps")]
    IndexOutOfRange { index: usize, len: usize },

    /// A registry was built without any steps.
    #[error("a wizard needs at least one step")]
    EmptyRegistry,

    /// The same step was registered twice.
    #[error("step at index {index} is already registered at an earlier position")]
    DuplicateStep { index: usize },

    /// No navigator is provided in a scope or any of its ancestors.
    #[error("no wizard navigator found in scope or its ancestors")]
    NoControllerFound,

    /// The scope id does not belong to the scope tree.
    #[error("unknown scope")]
    UnknownScope,

    /// The navigator has been disposed or replaced.
    #[error("navigator has been disposed")]
    Disposed,
}

impl From<ChannelError> for NavigationError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Closed => Self::Disposed,
        }
    }
}

/// Result type for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;
