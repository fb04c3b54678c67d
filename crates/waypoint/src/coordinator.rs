//! Lifecycle and animation choreography of a step transition.
//!
//! A transition runs in two barriers:
//!
//! 1. `on_showing` on the incoming step, `on_hiding` on the outgoing step and
//!    the page animation, all polled together until every one has finished;
//! 2. `on_showing_completed` and `on_hiding_completed`, polled together.
//!
//! Nothing here is cancellable: once started, both barriers run to the end.

use std::future::Future;

use futures_util::future;
use tracing::Instrument;
use waypoint_core::logging::targets;

use crate::step::Step;

/// Run the lifecycle hooks of `incoming` and `outgoing` around `animation`.
pub async fn run_step_transition<A>(incoming: &Step, outgoing: &Step, animation: A)
where
    A: Future<Output = ()>,
{
    let span = tracing::debug_span!(
        target: targets::TRANSITION,
        "lifecycle",
        incoming = %incoming,
        outgoing = %outgoing,
    );

    async {
        future::join3(
            incoming.lifecycle().on_showing(),
            outgoing.lifecycle().on_hiding(),
            animation,
        )
        .await;
        tracing::trace!(target: targets::TRANSITION, "showing/hiding and animation finished");

        future::join(
            incoming.lifecycle().on_showing_completed(),
            outgoing.lifecycle().on_hiding_completed(),
        )
        .await;
        tracing::trace!(target: targets::TRANSITION, "completion hooks finished");
    }
    .instrument(span)
    .await;
}
