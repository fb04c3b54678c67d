//! Page animation for wizards.
//!
//! The navigator asks a [`PageAnimator`] to perform every page change. This
//! module defines that capability, the easing curves passed to it, and a
//! timing-only animator ([`TransitionPager`]) usable directly or as a model
//! for host integrations.
//!
//! # Example
//!
//! ```ignore
//! use waypoint::animation::{Easing, PageAnimator, TransitionPager};
//! use std::time::Duration;
//!
//! let pager = TransitionPager::new(0);
//! pager.next_page(Duration::from_millis(150), Easing::EaseIn).await;
//! assert_eq!(pager.page(), 1);
//! ```

mod easing;
mod pager;
mod transition;

pub use easing::{ease, Easing};
pub use pager::{PageAnimator, TransitionPager};
pub use transition::{Direction, PageTransition, TransitionState};
