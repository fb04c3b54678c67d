//! Navigator configuration.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use waypoint::animation::Easing;
//! use waypoint::NavigatorConfig;
//!
//! let config = NavigatorConfig::default()
//!     .with_initial_index(1)
//!     .with_duration(Duration::from_millis(300))
//!     .with_easing(Easing::EaseInOut)
//!     .with_step_changed_hook(|from, to| async move {
//!         println!("leaving step {from} for step {to}");
//!     });
//!
//! assert_eq!(config.initial_index, 1);
//! assert!(config.on_step_changed.is_some());
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::animation::Easing;

/// Default transition duration.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(150);

/// Async hook awaited before the current index changes.
///
/// Receives `(from, to)`: the index being left and the index being entered.
pub type StepChangedHook = Arc<dyn Fn(usize, usize) -> BoxFuture<'static, ()> + Send + Sync>;

/// Construction settings of a [`WizardNavigator`](crate::WizardNavigator).
#[derive(Clone)]
pub struct NavigatorConfig {
    /// Step shown first.
    pub initial_index: usize,
    /// Duration used when a transition does not specify one.
    pub duration: Duration,
    /// Curve used when a transition does not specify one.
    pub easing: Easing,
    /// Hook awaited before every index change.
    pub on_step_changed: Option<StepChangedHook>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            duration: DEFAULT_TRANSITION_DURATION,
            easing: Easing::EaseIn,
            on_step_changed: None,
        }
    }
}

impl NavigatorConfig {
    /// Set the initial step.
    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    /// Set the default transition duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the default easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Register the step-changed hook.
    pub fn with_step_changed_hook<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(usize, usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_step_changed = Some(Arc::new(move |from: usize, to: usize| hook(from, to).boxed()));
        self
    }

    /// Remove the step-changed hook.
    pub fn without_step_changed_hook(mut self) -> Self {
        self.on_step_changed = None;
        self
    }
}

impl fmt::Debug for NavigatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorConfig")
            .field("initial_index", &self.initial_index)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_step_changed", &self.on_step_changed.is_some())
            .finish()
    }
}

/// Per-call overrides for a transition.
///
/// Unset fields fall back to the navigator's [`NavigatorConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Hold the index change until `duration` has elapsed since the
    /// transition was announced. Ignored by backward moves.
    pub delay: bool,
    /// Transition duration.
    pub duration: Option<Duration>,
    /// Easing curve.
    pub easing: Option<Easing>,
}

impl TransitionOptions {
    /// Options with the delay enabled.
    pub fn delayed() -> Self {
        Self {
            delay: true,
            ..Self::default()
        }
    }

    /// Override the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Override the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub(crate) fn resolve(&self, config: &NavigatorConfig) -> (Duration, Easing) {
        (
            self.duration.unwrap_or(config.duration),
            self.easing.unwrap_or(config.easing),
        )
    }
}
