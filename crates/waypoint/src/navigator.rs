//! The wizard navigation state machine.
//!
//! [`WizardNavigator`] owns the current step index and the event bus of a
//! wizard, and is the only thing that moves the index. Every move is guarded
//! by the step gates of its [`StepRegistry`]:
//!
//! - **next** needs a following step and an open next gate on the current step;
//! - **back** needs a preceding step and an open back gate on the current step;
//! - **go to** `target` needs the next gate of every step before `target`
//!   open, whichever direction the jump goes.
//!
//! A permitted move announces itself on the event bus, awaits the optional
//! step-changed hook, optionally waits out the transition duration, updates
//! the index and finally runs the lifecycle hooks around the page animation
//! (see [`run_step_transition`](crate::coordinator::run_step_transition)).
//!
//! # Serialization of moves
//!
//! The navigator does not guard against reentrancy. Drive it from a single
//! owner and await each move before starting the next one; overlapping moves
//! interleave their index reads and writes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint::animation::TransitionPager;
//! use waypoint::{NavigatorConfig, Step, StepRegistry, WizardNavigator};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let registry = StepRegistry::from_steps([
//!     Step::named("welcome"),
//!     Step::named("details"),
//!     Step::named("confirm"),
//! ])?;
//! let navigator = WizardNavigator::new(
//!     registry,
//!     Arc::new(TransitionPager::new(0)),
//!     NavigatorConfig::default(),
//! )?;
//!
//! assert!(navigator.go_next().await?);
//! assert_eq!(navigator.current_index(), 1);
//!
//! navigator.disable_go_next(1).await?;
//! assert!(!navigator.go_next().await?);
//! # Ok::<(), waypoint::NavigationError>(())
//! # }).unwrap();
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use tracing::Instrument;
use waypoint_core::logging::targets;
use waypoint_core::{Binding, ChangeStream, Observable, Signal};

use crate::animation::{Easing, PageAnimator};
use crate::config::{NavigatorConfig, TransitionOptions};
use crate::coordinator::run_step_transition;
use crate::error::{NavigationError, NavigationResult};
use crate::event::WizardEvent;
use crate::gate::StepGate;
use crate::registry::StepRegistry;
use crate::step::Step;

/// How the page animator is asked to move.
#[derive(Debug, Clone, Copy)]
enum PageMove {
    Next,
    Previous,
    To(usize),
}

impl PageMove {
    fn animate<'a>(
        self,
        animator: &'a dyn PageAnimator,
        duration: Duration,
        easing: Easing,
    ) -> BoxFuture<'a, ()> {
        match self {
            Self::Next => animator.next_page(duration, easing),
            Self::Previous => animator.previous_page(duration, easing),
            Self::To(page) => animator.animate_to_page(page, duration, easing),
        }
    }
}

/// Guarded step navigation for one wizard.
pub struct WizardNavigator {
    registry: StepRegistry,
    current_index: Arc<Observable<usize>>,
    events: Arc<Signal<WizardEvent>>,
    animator: Mutex<Option<Arc<dyn PageAnimator>>>,
    config: NavigatorConfig,
    disposed: AtomicBool,
}

impl WizardNavigator {
    /// Create a navigator positioned at `config.initial_index`.
    pub fn new(
        registry: StepRegistry,
        animator: Arc<dyn PageAnimator>,
        config: NavigatorConfig,
    ) -> NavigationResult<Self> {
        registry.check_index(config.initial_index)?;
        tracing::debug!(
            target: targets::NAVIGATOR,
            steps = registry.len(),
            initial_index = config.initial_index,
            "navigator created"
        );

        Ok(Self {
            current_index: Arc::new(Observable::new(config.initial_index)),
            events: Arc::new(Signal::new()),
            animator: Mutex::new(Some(animator)),
            registry,
            config,
            disposed: AtomicBool::new(false),
        })
    }

    /// Replace `previous` with a navigator over a new step set or config.
    ///
    /// The current index and the page animator carry over; the index is
    /// clamped to the new registry and `config.initial_index` is ignored.
    /// `previous` is disposed, closing its channels.
    pub fn recreate_from(
        previous: &WizardNavigator,
        registry: StepRegistry,
        config: NavigatorConfig,
    ) -> NavigationResult<Self> {
        let animator = previous.take_animator().ok_or(NavigationError::Disposed)?;
        let index = previous.current_index().min(registry.len() - 1);
        previous.dispose();

        tracing::debug!(
            target: targets::NAVIGATOR,
            carried_index = index,
            steps = registry.len(),
            "navigator re-created"
        );
        Self::new(registry, animator, config.with_initial_index(index))
    }

    /// Close both channels and release the page animator.
    ///
    /// Idempotent. Pending async subscribers see their streams end; later
    /// moves fail with [`NavigationError::Disposed`].
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.current_index.close();
        self.events.close();
        self.animator.lock().take();
        tracing::debug!(target: targets::NAVIGATOR, "navigator disposed");
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Index of the current step.
    pub fn current_index(&self) -> usize {
        self.current_index.get()
    }

    /// The current step.
    pub fn current_step(&self) -> &Step {
        self.current_gate().step()
    }

    /// Gate of the current step.
    pub fn current_gate(&self) -> &Arc<StepGate> {
        self.registry.gate_clamped(self.current_index())
    }

    /// Gate at `index`.
    pub fn gate(&self, index: usize) -> NavigationResult<&Arc<StepGate>> {
        self.registry.gate(index)
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.registry.len()
    }

    /// The step set.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// The construction settings.
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Whether the current step is the first one.
    pub fn is_first(&self) -> bool {
        self.registry.is_first(self.current_index())
    }

    /// Whether the current step is the last one.
    pub fn is_last(&self) -> bool {
        self.registry.is_last(self.current_index())
    }

    /// Whether [`go_next`](Self::go_next) would move.
    pub fn can_go_next(&self) -> bool {
        !self.is_last() && self.current_gate().is_go_next_enabled()
    }

    /// Whether [`go_back`](Self::go_back) would move.
    pub fn can_go_back(&self) -> bool {
        !self.is_first() && self.current_gate().is_go_back_enabled()
    }

    /// Whether every step before `target` has its next gate open.
    ///
    /// Always `true` for target 0.
    pub fn can_go_to(&self, target: usize) -> NavigationResult<bool> {
        Ok(self
            .registry
            .gates_before(target)?
            .iter()
            .all(|gate| gate.is_go_next_enabled()))
    }

    // =========================================================================
    // Channels
    // =========================================================================

    /// Latest-value channel of the current index.
    pub fn index_observable(&self) -> &Arc<Observable<usize>> {
        &self.current_index
    }

    /// Async stream of the current index followed by every change.
    pub fn index_stream(&self) -> ChangeStream<usize> {
        self.current_index.stream()
    }

    /// The event bus. Events are not replayed to late subscribers.
    pub fn events(&self) -> &Arc<Signal<WizardEvent>> {
        &self.events
    }

    /// Async stream of events emitted from now on.
    pub fn event_stream(&self) -> ChangeStream<WizardEvent> {
        self.events.stream()
    }

    /// Live "may go next" flag: the next gate of whichever step is current.
    pub fn is_go_next_enabled_stream(&self) -> Binding<bool> {
        let registry = self.registry.clone();
        Binding::switch_latest(&self.current_index, move |&index| {
            registry.gate_clamped(index).go_next_enabled().clone()
        })
    }

    /// Live "may go back" flag: the back gate of whichever step is current.
    pub fn is_go_back_enabled_stream(&self) -> Binding<bool> {
        let registry = self.registry.clone();
        Binding::switch_latest(&self.current_index, move |&index| {
            registry.gate_clamped(index).go_back_enabled().clone()
        })
    }

    /// Live [`can_go_to`](Self::can_go_to) for `target`.
    ///
    /// Re-evaluated whenever the index or any next gate before `target`
    /// changes.
    pub fn is_go_to_enabled_stream(&self, target: usize) -> NavigationResult<Binding<bool>> {
        let watched: Vec<Arc<StepGate>> = self.registry.gates_before(target)?.to_vec();

        let gates = watched.clone();
        let binding =
            Binding::computed(move || gates.iter().all(|gate| gate.is_go_next_enabled()));
        for gate in &watched {
            binding.depends_on(gate.go_next_enabled());
        }
        binding.depends_on(&self.current_index);
        Ok(binding)
    }

    // =========================================================================
    // Gate mutation
    // =========================================================================

    /// Open the back gate of step `index`.
    pub fn enable_go_back(&self, index: usize) -> NavigationResult<()> {
        self.ensure_active()?;
        self.registry.gate(index)?.enable_go_back();
        self.emit(WizardEvent::EnableGoBack { index })
    }

    /// Close the back gate of step `index`.
    pub fn disable_go_back(&self, index: usize) -> NavigationResult<()> {
        self.ensure_active()?;
        self.registry.gate(index)?.disable_go_back();
        self.emit(WizardEvent::DisableGoBack { index })
    }

    /// Open the next gate of step `index`.
    pub fn enable_go_next(&self, index: usize) -> NavigationResult<()> {
        self.ensure_active()?;
        self.registry.gate(index)?.enable_go_next();
        self.emit(WizardEvent::EnableGoNext { index })
    }

    /// Close the next gate of step `index` using the default transition.
    ///
    /// See [`disable_go_next_with`](Self::disable_go_next_with).
    pub async fn disable_go_next(&self, index: usize) -> NavigationResult<bool> {
        self.disable_go_next_with(index, TransitionOptions::default())
            .await
    }

    /// Close the next gate of step `index`.
    ///
    /// If the wizard is already past `index`, it is sent back there: a
    /// [`WizardEvent::ForcedGoBackTo`] is emitted, followed by the
    /// [`WizardEvent::GoTo`] of the move itself. The forced move skips the
    /// go-to guard, so it happens even when an earlier next gate is closed.
    /// Returns whether the wizard moved.
    pub async fn disable_go_next_with(
        &self,
        index: usize,
        options: TransitionOptions,
    ) -> NavigationResult<bool> {
        self.ensure_active()?;
        self.registry.gate(index)?.disable_go_next();
        self.emit(WizardEvent::DisableGoNext { index })?;

        let current = self.current_index();
        if index >= current {
            return Ok(false);
        }

        tracing::debug!(
            target: targets::NAVIGATOR,
            from = current,
            to = index,
            "next gate of a passed step closed, forcing back"
        );
        self.emit(WizardEvent::ForcedGoBackTo {
            from: current,
            to: index,
        })?;
        self.emit(WizardEvent::GoTo {
            from: current,
            to: index,
        })?;
        self.transition(current, index, options.delay, options, PageMove::To(index))
            .await?;
        Ok(true)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Move one step forward using the default transition.
    pub async fn go_next(&self) -> NavigationResult<bool> {
        self.go_next_with(TransitionOptions::default()).await
    }

    /// Move one step forward.
    ///
    /// Returns `Ok(false)` without side effects if the current step is the
    /// last one or its next gate is closed.
    pub async fn go_next_with(&self, options: TransitionOptions) -> NavigationResult<bool> {
        self.ensure_active()?;
        let from = self.current_index();
        if !self.can_go_next() {
            tracing::debug!(target: targets::NAVIGATOR, index = from, "go next ignored");
            return Ok(false);
        }

        let to = from + 1;
        self.emit(WizardEvent::GoNext { from, to })?;
        self.transition(from, to, options.delay, options, PageMove::Next)
            .await?;
        Ok(true)
    }

    /// Move one step backward using the default transition.
    pub async fn go_back(&self) -> NavigationResult<bool> {
        self.go_back_with(TransitionOptions::default()).await
    }

    /// Move one step backward.
    ///
    /// Returns `Ok(false)` without side effects if the current step is the
    /// first one or its back gate is closed. `options.delay` is ignored.
    pub async fn go_back_with(&self, options: TransitionOptions) -> NavigationResult<bool> {
        self.ensure_active()?;
        let from = self.current_index();
        if !self.can_go_back() {
            tracing::debug!(target: targets::NAVIGATOR, index = from, "go back ignored");
            return Ok(false);
        }

        let to = from - 1;
        self.emit(WizardEvent::GoBack { from, to })?;
        self.transition(from, to, false, options, PageMove::Previous)
            .await?;
        Ok(true)
    }

    /// Jump to step `target` using the default transition.
    pub async fn go_to(&self, target: usize) -> NavigationResult<bool> {
        self.go_to_with(target, TransitionOptions::default()).await
    }

    /// Jump to step `target`.
    ///
    /// Returns `Ok(false)` without side effects if `target` is the current
    /// step or a step before `target` has its next gate closed. Fails with
    /// [`NavigationError::IndexOutOfRange`] for an invalid `target`.
    pub async fn go_to_with(
        &self,
        target: usize,
        options: TransitionOptions,
    ) -> NavigationResult<bool> {
        self.ensure_active()?;
        let from = self.current_index();
        if !self.can_go_to(target)? || target == from {
            tracing::debug!(target: targets::NAVIGATOR, from, to = target, "go to ignored");
            return Ok(false);
        }

        self.emit(WizardEvent::GoTo { from, to: target })?;
        self.transition(from, target, options.delay, options, PageMove::To(target))
            .await?;
        Ok(true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn transition(
        &self,
        from: usize,
        to: usize,
        delay: bool,
        options: TransitionOptions,
        page_move: PageMove,
    ) -> NavigationResult<()> {
        let (duration, easing) = options.resolve(&self.config);
        let span = tracing::debug_span!(
            target: targets::NAVIGATOR,
            "step_transition",
            from,
            to,
            ?page_move,
        );

        async move {
            let deadline = tokio::time::Instant::now() + duration;

            if let Some(hook) = &self.config.on_step_changed {
                hook(from, to).await;
            }
            if delay {
                tokio::time::sleep_until(deadline).await;
            }

            // The hook may have disposed the navigator.
            let animator = self.animator()?;
            let incoming = self.registry.step(to)?;
            let outgoing = self.registry.step(from)?;
            self.current_index.set(to);

            run_step_transition(
                incoming,
                outgoing,
                page_move.animate(animator.as_ref(), duration, easing),
            )
            .await;

            tracing::debug!(target: targets::NAVIGATOR, from, to, "transition complete");
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn ensure_active(&self) -> NavigationResult<()> {
        if self.is_disposed() {
            tracing::warn!(target: targets::NAVIGATOR, "operation on disposed navigator");
            return Err(NavigationError::Disposed);
        }
        Ok(())
    }

    fn emit(&self, event: WizardEvent) -> NavigationResult<()> {
        tracing::debug!(target: targets::NAVIGATOR, %event, "event");
        self.events.try_emit(event)?;
        Ok(())
    }

    fn animator(&self) -> NavigationResult<Arc<dyn PageAnimator>> {
        self.animator.lock().clone().ok_or(NavigationError::Disposed)
    }

    fn take_animator(&self) -> Option<Arc<dyn PageAnimator>> {
        self.animator.lock().take()
    }
}

impl Drop for WizardNavigator {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for WizardNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardNavigator")
            .field("current_index", &self.current_index())
            .field("steps", &self.registry.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
