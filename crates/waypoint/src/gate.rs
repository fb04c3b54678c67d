//! Per-step navigation gates.
//!
//! A [`StepGate`] decides whether the wizard may leave its step backwards or
//! forwards. Both flags are latest-value channels: subscribers get the
//! current value at once and every later change.

use std::fmt;
use std::sync::Arc;

use waypoint_core::logging::targets;
use waypoint_core::Observable;

use crate::step::Step;

/// The back/next gate pair of one step.
pub struct StepGate {
    step: Step,
    back_enabled: Arc<Observable<bool>>,
    next_enabled: Arc<Observable<bool>>,
}

impl StepGate {
    /// Create a gate with both directions open.
    pub fn new(step: Step) -> Self {
        Self {
            step,
            back_enabled: Arc::new(Observable::new(true)),
            next_enabled: Arc::new(Observable::new(true)),
        }
    }

    /// Set the initial state of the back gate.
    pub fn with_go_back(self, enabled: bool) -> Self {
        self.back_enabled.set(enabled);
        self
    }

    /// Set the initial state of the next gate.
    pub fn with_go_next(self, enabled: bool) -> Self {
        self.next_enabled.set(enabled);
        self
    }

    /// The step this gate belongs to.
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Open the back gate. Returns `true` if it was closed.
    pub fn enable_go_back(&self) -> bool {
        self.set_go_back(true)
    }

    /// Close the back gate. Returns `true` if it was open.
    pub fn disable_go_back(&self) -> bool {
        self.set_go_back(false)
    }

    /// Open the next gate. Returns `true` if it was closed.
    pub fn enable_go_next(&self) -> bool {
        self.set_go_next(true)
    }

    /// Close the next gate. Returns `true` if it was open.
    pub fn disable_go_next(&self) -> bool {
        self.set_go_next(false)
    }

    /// Snapshot of the back gate.
    pub fn is_go_back_enabled(&self) -> bool {
        self.back_enabled.get()
    }

    /// Snapshot of the next gate.
    pub fn is_go_next_enabled(&self) -> bool {
        self.next_enabled.get()
    }

    /// Latest-value channel of the back gate.
    pub fn go_back_enabled(&self) -> &Arc<Observable<bool>> {
        &self.back_enabled
    }

    /// Latest-value channel of the next gate.
    pub fn go_next_enabled(&self) -> &Arc<Observable<bool>> {
        &self.next_enabled
    }

    fn set_go_back(&self, enabled: bool) -> bool {
        let changed = self.back_enabled.set(enabled);
        if changed {
            tracing::debug!(target: targets::NAVIGATOR, step = %self.step, enabled, "back gate changed");
        }
        changed
    }

    fn set_go_next(&self, enabled: bool) -> bool {
        let changed = self.next_enabled.set(enabled);
        if changed {
            tracing::debug!(target: targets::NAVIGATOR, step = %self.step, enabled, "next gate changed");
        }
        changed
    }
}

impl From<Step> for StepGate {
    fn from(step: Step) -> Self {
        Self::new(step)
    }
}

impl fmt::Debug for StepGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepGate")
            .field("step", &self.step)
            .field("back_enabled", &self.is_go_back_enabled())
            .field("next_enabled", &self.is_go_next_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_gate_defaults_open() {
        let gate = StepGate::new(Step::new());
        assert!(gate.is_go_back_enabled());
        assert!(gate.is_go_next_enabled());
    }

    #[test]
    fn test_gate_builder() {
        let gate = StepGate::new(Step::new()).with_go_next(false);
        assert!(gate.is_go_back_enabled());
        assert!(!gate.is_go_next_enabled());
    }

    #[test]
    fn test_gate_setters_are_idempotent() {
        let gate = StepGate::new(Step::new());
        assert!(!gate.enable_go_next());
        assert!(gate.disable_go_next());
        assert!(!gate.disable_go_next());
        assert!(!gate.is_go_next_enabled());

        assert!(gate.disable_go_back());
        assert!(gate.enable_go_back());
        assert!(gate.is_go_back_enabled());
    }

    #[test]
    fn test_gate_channels_replay_and_follow() {
        let gate = StepGate::new(Step::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        gate.go_next_enabled()
            .subscribe(move |&enabled| seen_clone.lock().push(enabled));

        gate.disable_go_next();
        gate.disable_go_next();
        gate.enable_go_next();

        assert_eq!(*seen.lock(), vec![true, false, true]);
    }
}
