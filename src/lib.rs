//! Crucible Route Solver Library
//!
//! Finds the cheapest route across a grid of cell costs for a mover that must
//! travel at least `min_run` and at most `max_run` steps in a straight line
//! before turning. See [`solver::PathEngine`] for the search itself.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod observer;
pub mod parse;
pub mod solver;

pub use error::{GridError, ParseError, SearchError};
pub use geometry::{Direction, Position};
pub use grid::{Grid, MAX_CELLS};
pub use observer::{NoopObserver, OnExpand, SearchObserver, SearchStats};
pub use parse::parse_grid;
pub use solver::{
    shortest_path, Cost, Outcome, PathEngine, Route, RunLimits, SearchState, UNREACHABLE,
};
