//! Navigation events.

use std::fmt;

/// An event broadcast by a [`WizardNavigator`](crate::WizardNavigator).
///
/// Transition events are emitted before the index changes; gate events after
/// the gate has been updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardEvent {
    /// Moving one step forward.
    GoNext { from: usize, to: usize },
    /// Moving one step backward.
    GoBack { from: usize, to: usize },
    /// Jumping to an arbitrary step.
    GoTo { from: usize, to: usize },
    /// The next gate of a passed step was closed; the wizard returns to it.
    ForcedGoBackTo { from: usize, to: usize },
    /// The back gate of a step was opened.
    EnableGoBack { index: usize },
    /// The back gate of a step was closed.
    DisableGoBack { index: usize },
    /// The next gate of a step was opened.
    EnableGoNext { index: usize },
    /// The next gate of a step was closed.
    DisableGoNext { index: usize },
}

impl WizardEvent {
    /// Whether this event announces a change of the current step.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::GoNext { .. } | Self::GoBack { .. } | Self::GoTo { .. } | Self::ForcedGoBackTo { .. }
        )
    }

    /// The step index the event concerns: the target for transitions, the
    /// gate's step otherwise.
    pub fn index(&self) -> usize {
        match *self {
            Self::GoNext { to, .. }
            | Self::GoBack { to, .. }
            | Self::GoTo { to, .. }
            | Self::ForcedGoBackTo { to, .. } => to,
            Self::EnableGoBack { index }
            | Self::DisableGoBack { index }
            | Self::EnableGoNext { index }
            | Self::DisableGoNext { index } => index,
        }
    }
}

impl fmt::Display for WizardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoNext { from, to } => write!(f, "go next {from} -> {to}"),
            Self::GoBack { from, to } => write!(f, "go back {from} -> {to}"),
            Self::GoTo { from, to } => write!(f, "go to {from} -> {to}"),
            Self::ForcedGoBackTo { from, to } => write!(f, "forced back {from} -> {to}"),
            Self::EnableGoBack { index } => write!(f, "enable back on {index}"),
            Self::DisableGoBack { index } => write!(f, "disable back on {index}"),
            Self::EnableGoNext { index } => write!(f, "enable next on {index}"),
            Self::DisableGoNext { index } => write!(f, "disable next on {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_classification() {
        assert!(WizardEvent::GoNext { from: 0, to: 1 }.is_transition());
        assert!(WizardEvent::ForcedGoBackTo { from: 2, to: 0 }.is_transition());
        assert!(!WizardEvent::DisableGoNext { index: 0 }.is_transition());

        assert_eq!(WizardEvent::GoBack { from: 2, to: 1 }.index(), 1);
        assert_eq!(WizardEvent::EnableGoBack { index: 4 }.index(), 4);
        assert_eq!(
            WizardEvent::ForcedGoBackTo { from: 2, to: 0 }.to_string(),
            "forced back 2 -> 0"
        );
    }
}
