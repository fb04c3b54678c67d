//! Page transition timing.
//!
//! A [`PageTransition`] records one animated page change and reports its
//! progress against the tokio clock, so paused-time tests and real event
//! loops see the same timeline.

use std::time::Duration;

use tokio::time::Instant;

use super::easing::Easing;

/// Direction of travel through the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher step indices.
    Forward,
    /// Towards lower step indices.
    Backward,
}

/// Snapshot of an animator's transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// No transition in progress.
    #[default]
    Idle,
    /// A transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
        /// Page transitioning from.
        from_page: usize,
        /// Page transitioning to.
        to_page: usize,
    },
}

impl TransitionState {
    /// Check if a transition is currently in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Get the eased progress if running.
    pub fn progress(&self) -> Option<f32> {
        match self {
            Self::Running { progress, .. } => Some(*progress),
            Self::Idle => None,
        }
    }
}

/// One animated page change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransition {
    from_page: usize,
    to_page: usize,
    duration: Duration,
    easing: Easing,
    started: Instant,
}

impl PageTransition {
    /// Start a transition now.
    pub fn start(from_page: usize, to_page: usize, duration: Duration, easing: Easing) -> Self {
        Self {
            from_page,
            to_page,
            duration,
            easing,
            started: Instant::now(),
        }
    }

    /// Page transitioning from.
    pub fn from_page(&self) -> usize {
        self.from_page
    }

    /// Page transitioning to.
    pub fn to_page(&self) -> usize {
        self.to_page
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Curve applied to the progress.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Direction of travel.
    pub fn direction(&self) -> Direction {
        if self.to_page >= self.from_page {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Linear progress from 0.0 to 1.0.
    pub fn linear_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.started.elapsed().as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Progress shaped by the transition's curve.
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.linear_progress())
    }

    /// Whether the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.started.elapsed() >= self.duration
    }

    /// Time left until the transition finishes.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.started.elapsed())
    }

    /// Current state snapshot.
    pub fn state(&self) -> TransitionState {
        if self.is_finished() {
            return TransitionState::Idle;
        }
        TransitionState::Running {
            progress: self.progress(),
            from_page: self.from_page,
            to_page: self.to_page,
        }
    }
}
