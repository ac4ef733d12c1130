//! Error types for grid construction, parsing and search configuration.

use thiserror::Error;

use crate::geometry::Position;

/// Errors raised while building a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// No cells were supplied.
    #[error("grid has no cells")]
    Empty,

    /// The same position was supplied twice.
    #[error("cell {0} was supplied more than once")]
    DuplicateCell(Position),

    /// A position outside the grid's bounding box was addressed.
    #[error("position {0} lies outside the grid")]
    OutsideGrid(Position),

    /// A position inside the bounding box that carries no cell was addressed.
    #[error("position {0} is a hole")]
    Hole(Position),

    /// The bounding box spans more cells than a grid may hold.
    #[error("grid spanning {rows}x{cols} cells exceeds the limit of {max} cells", max = crate::grid::MAX_CELLS)]
    TooLarge { rows: u64, cols: u64 },
}

/// Errors raised while reading a grid from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that is neither a digit nor a hole marker.
    #[error("invalid cell {found:?} at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors raised before or during a path search.
///
/// An unreachable target is not an error; see
/// [`Outcome::Unreachable`](crate::solver::Outcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The run limits violate `1 <= min_run <= max_run`.
    #[error("invalid run limits: min run {min_run} must be at least 1 and at most max run {max_run}")]
    InvalidConfiguration { min_run: u32, max_run: u32 },

    /// The start position has no cost in the grid.
    #[error("start position {0} lies outside the grid")]
    StartOutsideGrid(Position),

    /// The search expanded more states than its budget allows.
    #[error("search budget of {budget} expansions exhausted before reaching the target")]
    BudgetExhausted { budget: usize },
}
