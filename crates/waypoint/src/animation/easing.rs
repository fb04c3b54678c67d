//! Easing curves for page transitions.
//!
//! A curve maps linear progress (0.0 to 1.0) to eased progress. Page
//! animators receive the curve alongside the duration and use it to shape
//! the visual transition.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

/// Available easing curves.
///
/// The default is [`Easing::EaseIn`], the curve wizards use when a transition
/// is requested without an explicit curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Quadratic, starts slow.
    #[default]
    EaseIn,
    /// Quadratic, ends slow.
    EaseOut,
    /// Quadratic, slow at both ends.
    EaseInOut,
    /// Cubic, starts slow.
    EaseInCubic,
    /// Cubic, ends slow.
    EaseOutCubic,
    /// Sinusoidal, starts slow.
    EaseInSine,
    /// Sinusoidal, ends slow.
    EaseOutSine,
}

impl Easing {
    /// Apply the curve to a progress value.
    ///
    /// Input outside `0.0..=1.0` is clamped; both endpoints are fixed points
    /// of every curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - inv * inv,
            Self::EaseInOut if t < 0.5 => 2.0 * t * t,
            Self::EaseInOut => 1.0 - 2.0 * inv * inv,
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - inv * inv * inv,
            Self::EaseInSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::EaseOutSine => (t * FRAC_PI_2).sin(),
        }
    }

    /// Interpolate between `start` and `end` along the curve.
    pub fn lerp(self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.apply(t)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::EaseInCubic => "ease-in-cubic",
            Self::EaseOutCubic => "ease-out-cubic",
            Self::EaseInSine => "ease-in-sine",
            Self::EaseOutSine => "ease-out-sine",
        };
        f.write_str(name)
    }
}

/// Apply an easing curve to a progress value.
///
/// # Example
///
/// ```
/// use waypoint::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    easing.apply(t)
}
