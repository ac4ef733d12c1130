//! Grid coordinates and cardinal headings.
//!
//! Rows grow downwards and columns grow to the right, so `South` adds one row
//! and `East` adds one column.

use std::fmt;

/// A cell coordinate as (row, column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighboring position one step towards `direction`, or `None` if
    /// that step would leave the `i32` coordinate range.
    #[inline(always)]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.offset();
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    /// Number of orthogonal steps between two positions.
    #[inline]
    pub const fn manhattan(self, other: Self) -> u64 {
        self.row.abs_diff(other.row) as u64 + self.col.abs_diff(other.col) as u64
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All headings in clockwise order, starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset as (row delta, column delta).
    #[inline(always)]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The two headings reachable with a single 90 degree pivot.
    ///
    /// Never contains `self` or `self.opposite()`: continuing straight is a
    /// separate move governed by the run limits, and reversing is never legal.
    #[inline]
    pub const fn turns(self) -> [Direction; 2] {
        match self {
            Direction::North => [Direction::East, Direction::West],
            Direction::East => [Direction::South, Direction::North],
            Direction::South => [Direction::West, Direction::East],
            Direction::West => [Direction::North, Direction::South],
        }
    }

    /// Arrow glyph used when drawing a route.
    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}
