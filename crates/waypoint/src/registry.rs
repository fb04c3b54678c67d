//! The ordered step set of a wizard.
//!
//! A [`StepRegistry`] is immutable once built: changing the step set means
//! building a new registry and re-creating the navigator from the old one.
//! Cloning a registry is cheap and shares the gates.

use std::fmt;
use std::sync::Arc;

use crate::error::{NavigationError, NavigationResult};
use crate::gate::StepGate;
use crate::step::{Step, StepId};

/// Ordered, non-empty list of step gates with unique steps.
#[derive(Clone)]
pub struct StepRegistry {
    gates: Arc<[Arc<StepGate>]>,
}

impl StepRegistry {
    /// Build a registry from gates, in navigation order.
    ///
    /// Fails if `gates` is empty or if a step appears twice.
    pub fn new(gates: impl IntoIterator<Item = StepGate>) -> NavigationResult<Self> {
        let gates: Vec<Arc<StepGate>> = gates.into_iter().map(Arc::new).collect();
        if gates.is_empty() {
            return Err(NavigationError::EmptyRegistry);
        }
        for (index, gate) in gates.iter().enumerate() {
            let id = gate.step().id();
            if gates[..index].iter().any(|g| g.step().id() == id) {
                return Err(NavigationError::DuplicateStep { index });
            }
        }
        Ok(Self {
            gates: gates.into(),
        })
    }

    /// Build a registry of open gates from steps.
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> NavigationResult<Self> {
        Self::new(steps.into_iter().map(StepGate::new))
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Always `false`: registries hold at least one step.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Position of `step`, compared by identity.
    pub fn index_of(&self, step: &Step) -> Option<usize> {
        self.index_of_id(step.id())
    }

    /// Position of the step with id `id`.
    pub fn index_of_id(&self, id: StepId) -> Option<usize> {
        self.gates.iter().position(|gate| gate.step().id() == id)
    }

    /// Whether `index` is the first position.
    pub fn is_first(&self, index: usize) -> bool {
        index == 0
    }

    /// Whether `index` is the last position.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.gates.len()
    }

    /// Gate at `index`.
    pub fn gate(&self, index: usize) -> NavigationResult<&Arc<StepGate>> {
        self.gates.get(index).ok_or(NavigationError::IndexOutOfRange {
            index,
            len: self.gates.len(),
        })
    }

    /// Step at `index`.
    pub fn step(&self, index: usize) -> NavigationResult<&Step> {
        self.gate(index).map(|gate| gate.step())
    }

    /// Gates at positions `0..=index`.
    pub fn gates_up_to(&self, index: usize) -> NavigationResult<&[Arc<StepGate>]> {
        self.check_index(index)?;
        Ok(&self.gates[..=index])
    }

    /// Gates at positions `0..target`; empty for target 0.
    ///
    /// These are the gates whose next flag must be open to reach `target`.
    pub fn gates_before(&self, target: usize) -> NavigationResult<&[Arc<StepGate>]> {
        self.check_index(target)?;
        Ok(&self.gates[..target])
    }

    /// All gates in order.
    pub fn gates(&self) -> &[Arc<StepGate>] {
        &self.gates
    }

    /// Iterate over the steps in order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.gates.iter().map(|gate| gate.step())
    }

    /// Fail with `IndexOutOfRange` unless `index < len`.
    pub fn check_index(&self, index: usize) -> NavigationResult<()> {
        if index < self.gates.len() {
            Ok(())
        } else {
            Err(NavigationError::IndexOutOfRange {
                index,
                len: self.gates.len(),
            })
        }
    }

    /// Gate at `index`, or the last gate if `index` is past the end.
    pub(crate) fn gate_clamped(&self, index: usize) -> &Arc<StepGate> {
        let last = self.gates.len() - 1;
        &self.gates[index.min(last)]
    }
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.gates.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> (Vec<Step>, StepRegistry) {
        let steps = vec![Step::named("a"), Step::named("b"), Step::named("c")];
        let registry = StepRegistry::from_steps(steps.clone()).unwrap();
        (steps, registry)
    }

    #[test]
    fn test_registry_rejects_empty() {
        let result = StepRegistry::from_steps(Vec::new());
        assert_eq!(result.unwrap_err(), NavigationError::EmptyRegistry);
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let step = Step::new();
        let result = StepRegistry::from_steps([step.clone(), Step::new(), step]);
        assert_eq!(
            result.unwrap_err(),
            NavigationError::DuplicateStep { index: 2 }
        );
    }

    #[test]
    fn test_index_of_uses_identity() {
        let (steps, registry) = three_steps();
        assert_eq!(registry.index_of(&steps[1]), Some(1));
        assert_eq!(registry.index_of(&Step::named("b")), None);
    }

    #[test]
    fn test_first_and_last() {
        let (_, registry) = three_steps();
        assert!(registry.is_first(0));
        assert!(!registry.is_first(1));
        assert!(registry.is_last(2));
        assert!(!registry.is_last(1));
    }

    #[test]
    fn test_gate_slices() {
        let (steps, registry) = three_steps();
        assert_eq!(registry.gates_up_to(1).unwrap().len(), 2);
        assert_eq!(registry.gates_up_to(2).unwrap()[2].step(), &steps[2]);
        assert!(registry.gates_before(0).unwrap().is_empty());
        assert_eq!(registry.gates_before(2).unwrap().len(), 2);
        assert_eq!(
            registry.gates_up_to(3).unwrap_err(),
            NavigationError::IndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_clones_share_gates() {
        let (_, registry) = three_steps();
        let copy = registry.clone();
        copy.gate(1).unwrap().disable_go_next();
        assert!(!registry.gate(1).unwrap().is_go_next_enabled());
    }
}
