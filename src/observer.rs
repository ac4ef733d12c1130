//! Progress hooks for a running search.

use crate::solver::{Cost, SearchState};

/// Counters collected over one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded (including the final target state).
    pub expanded: usize,
    /// Frontier pushes, seeds included.
    pub pushed: usize,
    /// Popped entries skipped because a cheaper path to their state was found.
    pub stale: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

/// Receives callbacks while [`PathEngine`](crate::solver::PathEngine) runs.
///
/// Every hook defaults to doing nothing.
pub trait SearchObserver {
    /// Called once per initial state before the loop starts.
    fn on_seed(&mut self, _state: &SearchState) {}

    /// Called when a state is popped for expansion with its accumulated cost.
    fn on_expand(&mut self, _state: &SearchState, _cost: Cost) {}

    /// Called once when the search stops, whatever the outcome.
    fn on_finish(&mut self, _stats: &SearchStats) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Adapts a closure into an observer of expansions.
pub struct OnExpand<F>(pub F);

impl<F: FnMut(&SearchState, Cost)> SearchObserver for OnExpand<F> {
    fn on_expand(&mut self, state: &SearchState, cost: Cost) {
        (self.0)(state, cost)
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_seed(&mut self, state: &SearchState) {
        (**self).on_seed(state)
    }

    fn on_expand(&mut self, state: &SearchState, cost: Cost) {
        (**self).on_expand(state, cost)
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        (**self).on_finish(stats)
    }
}
