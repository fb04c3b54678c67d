//! Wizard steps and their lifecycle hooks.
//!
//! A [`Step`] is an identity token for one wizard page. Two steps are equal
//! only if one is a clone of the other; names are for logs and carry no
//! identity.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use waypoint::{Step, StepLifecycle};
//!
//! struct Summary;
//!
//! #[async_trait]
//! impl StepLifecycle for Summary {
//!     async fn on_showing(&self) {
//!         println!("refreshing summary");
//!     }
//! }
//!
//! let welcome = Step::named("welcome");
//! let summary = Step::named("summary").with_lifecycle(Summary);
//! assert_ne!(welcome, summary);
//! assert_eq!(summary.clone(), summary);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

static NEXT_STEP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(u64);

impl StepId {
    fn next() -> Self {
        Self(NEXT_STEP_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logging.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// Callbacks a step receives while it is shown or hidden.
///
/// During a transition the navigator runs `on_showing` on the incoming step
/// and `on_hiding` on the outgoing step together with the page animation,
/// then `on_showing_completed` and `on_hiding_completed` together. Every
/// method defaults to a no-op.
#[async_trait]
pub trait StepLifecycle: Send + Sync {
    /// The step is about to become visible.
    async fn on_showing(&self) {}

    /// The step is about to be hidden.
    async fn on_hiding(&self) {}

    /// The step is fully visible.
    async fn on_showing_completed(&self) {}

    /// The step is fully hidden.
    async fn on_hiding_completed(&self) {}
}

/// Lifecycle of steps that do not react to transitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLifecycle;

#[async_trait]
impl StepLifecycle for NoLifecycle {}

/// One page of a wizard.
#[derive(Clone)]
pub struct Step {
    id: StepId,
    name: Option<Arc<str>>,
    lifecycle: Arc<dyn StepLifecycle>,
}

impl Step {
    /// Create an anonymous step without lifecycle hooks.
    pub fn new() -> Self {
        Self {
            id: StepId::next(),
            name: None,
            lifecycle: Arc::new(NoLifecycle),
        }
    }

    /// Create a named step without lifecycle hooks.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Attach lifecycle hooks.
    pub fn with_lifecycle(mut self, lifecycle: impl StepLifecycle + 'static) -> Self {
        self.lifecycle = Arc::new(lifecycle);
        self
    }

    /// Attach shared lifecycle hooks.
    pub fn with_shared_lifecycle(mut self, lifecycle: Arc<dyn StepLifecycle>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// The step's identity.
    pub fn id(&self) -> StepId {
        self.id
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The lifecycle hooks.
    pub fn lifecycle(&self) -> &dyn StepLifecycle {
        self.lifecycle.as_ref()
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Step {}

impl Hash for Step {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_identity() {
        let a = Step::named("same");
        let b = Step::named("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(a.id() < b.id());
    }

    #[test]
    fn test_step_display() {
        let anonymous = Step::new();
        assert!(anonymous.to_string().starts_with("step#"));
        let named = Step::named("review");
        assert!(named.to_string().starts_with("review (step#"));
        assert_eq!(named.name(), Some("review"));
    }

    #[tokio::test]
    async fn test_default_lifecycle_is_noop() {
        let step = Step::new();
        step.lifecycle().on_showing().await;
        step.lifecycle().on_hiding().await;
        step.lifecycle().on_showing_completed().await;
        step.lifecycle().on_hiding_completed().await;
    }
}
