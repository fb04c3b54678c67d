//! The page animation primitive.
//!
//! A wizard does not draw its pages. The host owns a pager (a page view,
//! a stacked widget, a terminal screen) and exposes it to the navigator
//! through [`PageAnimator`]. Each method resolves once the visual transition
//! has finished.
//!
//! [`TransitionPager`] is a ready-made animator that keeps the displayed page
//! as an observable value and completes after the requested duration. Hosts
//! can poll [`TransitionPager::transition_state`] each frame to drive their
//! own drawing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use waypoint_core::Observable;

use super::easing::Easing;
use super::transition::{PageTransition, TransitionState};

/// Page-flip animation capability provided by the host.
#[async_trait]
pub trait PageAnimator: Send + Sync {
    /// Animate to the page after the displayed one.
    async fn next_page(&self, duration: Duration, easing: Easing);

    /// Animate to the page before the displayed one.
    async fn previous_page(&self, duration: Duration, easing: Easing);

    /// Animate directly to `page`.
    async fn animate_to_page(&self, page: usize, duration: Duration, easing: Easing);
}

/// A page animator that tracks the displayed page and times each transition.
pub struct TransitionPager {
    page: Arc<Observable<usize>>,
    active: Mutex<Option<PageTransition>>,
}

impl TransitionPager {
    /// Create a pager showing `initial_page`.
    pub fn new(initial_page: usize) -> Self {
        Self {
            page: Arc::new(Observable::new(initial_page)),
            active: Mutex::new(None),
        }
    }

    /// The page currently displayed.
    ///
    /// During a transition this is still the page being left; it switches
    /// when the transition completes.
    pub fn page(&self) -> usize {
        self.page.get()
    }

    /// Observable displayed page.
    pub fn page_observable(&self) -> &Arc<Observable<usize>> {
        &self.page
    }

    /// Snapshot of the running transition, if any.
    pub fn transition_state(&self) -> TransitionState {
        self.active
            .lock()
            .as_ref()
            .map_or(TransitionState::Idle, PageTransition::state)
    }

    async fn run(&self, to_page: usize, duration: Duration, easing: Easing) {
        let from_page = self.page.get();
        let transition = PageTransition::start(from_page, to_page, duration, easing);
        *self.active.lock() = Some(transition);

        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }

        *self.active.lock() = None;
        self.page.set(to_page);
    }
}

impl Default for TransitionPager {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl PageAnimator for TransitionPager {
    async fn next_page(&self, duration: Duration, easing: Easing) {
        let to_page = self.page.get() + 1;
        self.run(to_page, duration, easing).await;
    }

    async fn previous_page(&self, duration: Duration, easing: Easing) {
        let to_page = self.page.get().saturating_sub(1);
        self.run(to_page, duration, easing).await;
    }

    async fn animate_to_page(&self, page: usize, duration: Duration, easing: Easing) {
        self.run(page, duration, easing).await;
    }
}

impl std::fmt::Debug for TransitionPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionPager")
            .field("page", &self.page())
            .field("state", &self.transition_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pager_switches_page_after_duration() {
        let pager = Arc::new(TransitionPager::new(0));

        let task_pager = pager.clone();
        let task = tokio::spawn(async move {
            task_pager
                .next_page(Duration::from_millis(200), Easing::Linear)
                .await;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(pager.page(), 0);
        let state = pager.transition_state();
        assert!(state.is_running());
        assert!(matches!(
            state,
            TransitionState::Running { from_page: 0, to_page: 1, .. }
        ));

        task.await.unwrap();
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.transition_state(), TransitionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pager_navigation() {
        let pager = TransitionPager::new(2);
        pager.previous_page(Duration::from_millis(10), Easing::EaseIn).await;
        assert_eq!(pager.page(), 1);
        pager.animate_to_page(4, Duration::ZERO, Easing::EaseIn).await;
        assert_eq!(pager.page(), 4);
        pager.animate_to_page(0, Duration::from_millis(10), Easing::EaseIn).await;
        assert_eq!(pager.page(), 0);
        pager.previous_page(Duration::ZERO, Easing::EaseIn).await;
        assert_eq!(pager.page(), 0);
    }
}
