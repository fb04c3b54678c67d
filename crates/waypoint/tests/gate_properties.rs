//! Property-based tests for the go-to rule over arbitrary step sets.

use std::sync::Arc;

use proptest::prelude::*;

use waypoint::animation::TransitionPager;
use waypoint::{NavigatorConfig, Step, StepGate, StepRegistry, WizardNavigator};

/// Next-gate flags for 1..8 steps, plus a sequence of `(step, open)` toggles.
fn gates_and_toggles() -> impl Strategy<Value = (Vec<bool>, Vec<(usize, bool)>)> {
    (1usize..8).prop_flat_map(|steps| {
        (
            prop::collection::vec(any::<bool>(), steps),
            prop::collection::vec((0..steps, any::<bool>()), 0..16),
        )
    })
}

fn navigator(next_flags: &[bool]) -> WizardNavigator {
    let registry = StepRegistry::new(
        next_flags
            .iter()
            .map(|&open| StepGate::new(Step::new()).with_go_next(open)),
    )
    .unwrap();
    WizardNavigator::new(
        registry,
        Arc::new(TransitionPager::default()),
        NavigatorConfig::default(),
    )
    .unwrap()
}

fn expected(flags: &[bool], target: usize) -> bool {
    flags[..target].iter().all(|&open| open)
}

proptest! {
    #[test]
    fn test_can_go_to_matches_prefix_of_next_gates((flags, toggles) in gates_and_toggles()) {
        let navigator = navigator(&flags);
        let steps = flags.len();
        let streams: Vec<_> = (0..steps)
            .map(|target| navigator.is_go_to_enabled_stream(target).unwrap())
            .collect();

        let mut flags = flags;
        for target in 0..steps {
            prop_assert_eq!(navigator.can_go_to(target).unwrap(), expected(&flags, target));
            prop_assert_eq!(streams[target].get(), expected(&flags, target));
        }

        for (step, open) in toggles {
            let gate = navigator.gate(step).unwrap();
            if open {
                gate.enable_go_next();
            } else {
                gate.disable_go_next();
            }
            flags[step] = open;

            for target in 0..steps {
                prop_assert_eq!(navigator.can_go_to(target).unwrap(), expected(&flags, target));
                prop_assert_eq!(streams[target].get(), expected(&flags, target));
            }
        }

        prop_assert!(navigator.can_go_to(0).unwrap());
        prop_assert!(navigator.can_go_to(steps).is_err());
    }
}
