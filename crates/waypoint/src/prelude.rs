//! Prelude module for Waypoint.
//!
//! ```ignore
//! use waypoint::prelude::*;
//! ```

// ============================================================================
// Reactive Channels
// ============================================================================

pub use crate::{Binding, ChangeStream, ConnectionId, Observable, Signal};

// ============================================================================
// Steps and Navigation
// ============================================================================

pub use crate::error::{NavigationError, NavigationResult};
pub use crate::event::WizardEvent;
pub use crate::gate::StepGate;
pub use crate::navigator::WizardNavigator;
pub use crate::registry::StepRegistry;
pub use crate::step::{Step, StepLifecycle};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{NavigatorConfig, TransitionOptions};
pub use crate::animation::{Easing, PageAnimator};

// ============================================================================
// Scopes
// ============================================================================

pub use crate::scope::{ScopeId, ScopeTree};
