//! Constrained best-first (A*) route search.
//!
//! Plain grid search keeps one state per cell, which loses the information a
//! turn depends on. Here each state also carries its heading and how many
//! consecutive steps were taken in it, so the state space is
//! `cells x 4 x max_run`.
//!
//! Key points:
//! - Best-known cost per state in an `FxHashMap`; superseded heap entries are
//!   skipped when popped instead of being searched for in the heap
//! - Heuristic is the Manhattan distance scaled by the cheapest cell, which
//!   stays admissible when zero-cost cells exist
//! - Ties on f are broken by insertion order, so runs are deterministic
//! - Steps whose accumulated cost would reach [`UNREACHABLE`] are dropped, as
//!   are steps past the `i32` coordinate range

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::geometry::{Direction, Position};
use crate::grid::Grid;
use crate::observer::{NoopObserver, SearchObserver, SearchStats};

/// Accumulated or per-cell traversal cost.
pub type Cost = u64;

/// Sentinel cost standing for "no route".
pub const UNREACHABLE: Cost = Cost::MAX;

/// Headings the mover may start with; it has not moved in either yet.
const SEED_HEADINGS: [Direction; 2] = [Direction::East, Direction::South];

/// Validated `(min_run, max_run)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunLimits {
    min: u32,
    max: u32,
}

impl RunLimits {
    /// At most three steps in a line, turning allowed at any time.
    pub const STANDARD: Self = Self { min: 1, max: 3 };

    /// At least four and at most ten steps in a line.
    pub const ULTRA: Self = Self { min: 4, max: 10 };

    /// Fails unless `1 <= min_run <= max_run`.
    pub fn new(min_run: u32, max_run: u32) -> Result<Self, SearchError> {
        if min_run < 1 || max_run < min_run {
            return Err(SearchError::InvalidConfiguration { min_run, max_run });
        }
        Ok(Self {
            min: min_run,
            max: max_run,
        })
    }

    pub fn min_run(&self) -> u32 {
        self.min
    }

    pub fn max_run(&self) -> u32 {
        self.max
    }
}

/// A search node: where the mover is, which way it faces, and how many
/// consecutive steps it has taken facing that way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub position: Position,
    pub heading: Direction,
    pub run: u32,
}

impl SearchState {
    pub const fn new(position: Position, heading: Direction, run: u32) -> Self {
        Self {
            position,
            heading,
            run,
        }
    }

    /// The state after one step towards `heading`, or `None` when the step
    /// would leave the coordinate range.
    #[inline]
    fn advance(self, heading: Direction) -> Option<Self> {
        let run = if heading == self.heading { self.run + 1 } else { 1 };
        Some(Self::new(self.position.step(heading)?, heading, run))
    }

    /// Candidate states reachable in one step, ignoring grid bounds.
    ///
    /// Straight on is legal below `max_run`. Turning is legal once `min_run`
    /// steps are done, or before the first step has been taken.
    fn successors(self, limits: RunLimits) -> impl Iterator<Item = SearchState> {
        let straight = (self.run < limits.max).then_some(self.heading);
        let may_turn = self.run == 0 || self.run >= limits.min;
        let turns = may_turn.then(|| self.heading.turns());
        straight
            .into_iter()
            .chain(turns.into_iter().flatten())
            .filter_map(move |heading| self.advance(heading))
    }
}

/// Heap entry ordered by lowest `f`, then by earliest push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    state: SearchState,
    g: Cost,
    f: Cost,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A cheapest route from the start to the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    start: Position,
    cost: Cost,
    steps: Vec<SearchState>,
}

impl Route {
    pub fn new(start: Position, cost: Cost, steps: Vec<SearchState>) -> Self {
        Self { start, cost, steps }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Total cost of every cell entered; the start cell is never charged.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// States stepped into, in order. Empty when start and target coincide.
    pub fn steps(&self) -> &[SearchState] {
        &self.steps
    }

    /// Every position visited, start included.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.start).chain(self.steps.iter().map(|state| state.position))
    }
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Reached(Route),
    /// The frontier emptied without reaching the target.
    Unreachable,
}

impl Outcome {
    pub fn cost(&self) -> Option<Cost> {
        self.route().map(Route::cost)
    }

    /// The route cost, or [`UNREACHABLE`] when there is none.
    pub fn cost_or_unreachable(&self) -> Cost {
        self.cost().unwrap_or(UNREACHABLE)
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Outcome::Reached(route) => Some(route),
            Outcome::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Outcome::Reached(_))
    }
}

/// Finds the cheapest route from (0, 0) to the grid's bottom-right corner.
///
/// The run limits are validated before anything else happens.
pub fn shortest_path(grid: &Grid, min_run: u32, max_run: u32) -> Result<Outcome, SearchError> {
    let limits = RunLimits::new(min_run, max_run)?;
    PathEngine::new(grid, limits).run()
}

/// Best-first search driver over one borrowed grid.
///
/// All search tables live inside [`PathEngine::run`], so repeated runs are
/// independent and return the same outcome.
pub struct PathEngine<'g, O = NoopObserver> {
    grid: &'g Grid,
    limits: RunLimits,
    start: Position,
    budget: Option<usize>,
    observer: O,
}

impl<'g> PathEngine<'g> {
    /// Creates an engine starting at (0, 0) with no budget and no observer.
    pub fn new(grid: &'g Grid, limits: RunLimits) -> Self {
        Self {
            grid,
            limits,
            start: Position::new(0, 0),
            budget: None,
            observer: NoopObserver,
        }
    }
}

impl<'g, O: SearchObserver> PathEngine<'g, O> {
    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    /// Caps the number of expansions; exceeding it fails the search.
    pub fn with_budget(mut self, max_expansions: usize) -> Self {
        self.budget = Some(max_expansions);
        self
    }

    pub fn with_observer<P: SearchObserver>(self, observer: P) -> PathEngine<'g, P> {
        PathEngine {
            grid: self.grid,
            limits: self.limits,
            start: self.start,
            budget: self.budget,
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn limits(&self) -> RunLimits {
        self.limits
    }

    /// Admissible estimate of the remaining cost from `position`.
    #[inline]
    fn estimate(&self, position: Position) -> Cost {
        self.grid
            .min_cost()
            .saturating_mul(position.manhattan(self.grid.target()))
    }

    /// Runs the search to completion.
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        let mut stats = SearchStats::default();
        let result = if self.grid.cost_at(self.start).is_some() {
            self.search(&mut stats)
        } else {
            Err(SearchError::StartOutsideGrid(self.start))
        };
        self.observer.on_finish(&stats);

        debug!(
            min_run = self.limits.min,
            max_run = self.limits.max,
            expanded = stats.expanded,
            pushed = stats.pushed,
            stale = stats.stale,
            peak_frontier = stats.peak_frontier,
            cost = ?result.as_ref().ok().and_then(Outcome::cost),
            "search finished"
        );

        result
    }

    fn search(&mut self, stats: &mut SearchStats) -> Result<Outcome, SearchError> {
        let mut best_cost: FxHashMap<SearchState, Cost> = FxHashMap::default();
        let mut came_from: FxHashMap<SearchState, SearchState> = FxHashMap::default();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut sequence = 0u64;

        let start_estimate = self.estimate(self.start);
        for heading in SEED_HEADINGS {
            let seed = SearchState::new(self.start, heading, 0);
            best_cost.insert(seed, 0);
            self.observer.on_seed(&seed);
            frontier.push(FrontierEntry {
                state: seed,
                g: 0,
                f: start_estimate,
                sequence,
            });
            sequence += 1;
            stats.pushed += 1;
        }
        stats.peak_frontier = frontier.len();

        while let Some(entry) = frontier.pop() {
            let current = entry.state;

            // skip entries superseded by a cheaper push of the same state
            if best_cost.get(&current).is_some_and(|&g| entry.g > g) {
                stats.stale += 1;
                continue;
            }

            if let Some(budget) = self.budget {
                if stats.expanded >= budget {
                    return Err(SearchError::BudgetExhausted { budget });
                }
            }

            stats.expanded += 1;
            self.observer.on_expand(&current, entry.g);
            trace!(?current, g = entry.g, f = entry.f, "expand");

            if self.grid.is_target(current.position) {
                let steps = reconstruct_steps(&came_from, current);
                return Ok(Outcome::Reached(Route::new(self.start, entry.g, steps)));
            }

            for next in current.successors(self.limits) {
                let Some(step_cost) = self.grid.cost_at(next.position) else {
                    continue;
                };

                // a total of UNREACHABLE or more cannot be told apart from no route
                let Some(tentative) = entry
                    .g
                    .checked_add(step_cost)
                    .filter(|&g| g < UNREACHABLE)
                else {
                    continue;
                };
                if best_cost.get(&next).is_some_and(|&g| tentative >= g) {
                    continue;
                }

                best_cost.insert(next, tentative);
                came_from.insert(next, current);
                frontier.push(FrontierEntry {
                    state: next,
                    g: tentative,
                    f: tentative.saturating_add(self.estimate(next.position)),
                    sequence,
                });
                sequence += 1;
                stats.pushed += 1;
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        Ok(Outcome::Unreachable)
    }
}

/// Walks parent links back from `last` to a seed, returning the steps in order.
///
/// Seeds have no parent, so they are never part of the returned steps.
fn reconstruct_steps(
    came_from: &FxHashMap<SearchState, SearchState>,
    last: SearchState,
) -> Vec<SearchState> {
    let mut steps = Vec::new();
    let mut current = last;
    while let Some(&parent) = came_from.get(&current) {
        steps.push(current);
        current = parent;
    }
    steps.reverse();
    steps
}
