//! Waypoint - gated step navigation for multi-page wizards.
//!
//! A wizard is an ordered list of [`Step`]s shown one at a time. Each step
//! carries a [`StepGate`] whose back/next flags decide whether the user may
//! leave it, and a [`WizardNavigator`] moves between steps only through
//! those gates. Every move is announced on an event bus, runs the steps'
//! [`StepLifecycle`] hooks around a page animation, and is observable as a
//! latest-value channel of the current index.
//!
//! The reactive plumbing (signals, observables, bindings and async change
//! streams) lives in `waypoint-core` and is re-exported here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint::animation::TransitionPager;
//! use waypoint::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let registry = StepRegistry::new([
//!     StepGate::new(Step::named("account")),
//!     StepGate::new(Step::named("profile")).with_go_next(false),
//!     StepGate::new(Step::named("done")),
//! ])?;
//! let navigator = WizardNavigator::new(
//!     registry,
//!     Arc::new(TransitionPager::default()),
//!     NavigatorConfig::default(),
//! )?;
//!
//! let can_finish = navigator.is_go_to_enabled_stream(2)?;
//! assert!(!can_finish.get());
//!
//! navigator.go_next().await?;
//! navigator.enable_go_next(1)?;
//! assert!(can_finish.get());
//! assert!(navigator.go_to(2).await?);
//! # Ok::<(), NavigationError>(())
//! # }).unwrap();
//! ```

pub use waypoint_core::*;

pub mod animation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod gate;
pub mod navigator;
pub mod prelude;
pub mod registry;
pub mod scope;
pub mod step;

pub use config::{NavigatorConfig, StepChangedHook, TransitionOptions, DEFAULT_TRANSITION_DURATION};
pub use error::{NavigationError, NavigationResult};
pub use event::WizardEvent;
pub use gate::StepGate;
pub use navigator::WizardNavigator;
pub use registry::StepRegistry;
pub use scope::{ScopeId, ScopeTree};
pub use step::{NoLifecycle, Step, StepId, StepLifecycle};
