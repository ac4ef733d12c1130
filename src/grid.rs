//! Immutable cost grid.
//!
//! Cells are stored densely over the bounding box of the supplied positions,
//! row-major, with `None` marking holes inside the box. The grid is never
//! mutated once built; [`Grid::with_cost`] produces a modified copy.

use crate::error::GridError;
use crate::geometry::Position;
use crate::solver::{Cost, Route};

/// Largest bounding box, in cells, that a grid may span.
pub const MAX_CELLS: usize = 1 << 24;

/// Terrain costs indexed by [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Minimum (row, col) corner of the bounding box.
    origin: Position,
    /// Maximum (row, col) corner of the bounding box.
    target: Position,
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cost>>,
    /// Smallest cost present; zero only if some cell costs nothing.
    min_cost: Cost,
}

impl Grid {
    /// Builds a grid from row-major costs with the origin at (0, 0).
    ///
    /// Ragged rows are allowed; cells missing from short rows become holes.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = Cost>,
    {
        let cells = rows.into_iter().enumerate().flat_map(|(row, costs)| {
            costs
                .into_iter()
                .enumerate()
                .map(move |(col, cost)| (Position::new(row as i32, col as i32), cost))
        });
        Self::from_cells(cells)
    }

    /// Builds a grid from arbitrary (position, cost) pairs.
    ///
    /// Bounds are the extreme coordinates present; positions inside the
    /// bounds that were not supplied become holes. The bounding box is
    /// stored densely, so it may cover at most [`MAX_CELLS`] cells.
    pub fn from_cells(cells: impl IntoIterator<Item = (Position, Cost)>) -> Result<Self, GridError> {
        let cells: Vec<(Position, Cost)> = cells.into_iter().collect();
        let Some(&(first, _)) = cells.first() else {
            return Err(GridError::Empty);
        };

        let (mut min, mut max) = (first, first);
        for &(position, _) in &cells {
            min.row = min.row.min(position.row);
            min.col = min.col.min(position.col);
            max.row = max.row.max(position.row);
            max.col = max.col.max(position.col);
        }

        let rows = u64::from(max.row.abs_diff(min.row)) + 1;
        let cols = u64::from(max.col.abs_diff(min.col)) + 1;
        let (rows, cols) = match rows.checked_mul(cols) {
            Some(area) if area <= MAX_CELLS as u64 => (rows as usize, cols as usize),
            _ => return Err(GridError::TooLarge { rows, cols }),
        };

        let mut grid = Self {
            origin: min,
            target: max,
            rows,
            cols,
            cells: vec![None; rows * cols],
            min_cost: Cost::MAX,
        };

        for (position, cost) in cells {
            let cell_index = grid
                .index(position)
                .ok_or(GridError::OutsideGrid(position))?;
            if grid.cells[cell_index].replace(cost).is_some() {
                return Err(GridError::DuplicateCell(position));
            }
            grid.min_cost = grid.min_cost.min(cost);
        }

        Ok(grid)
    }

    /// Returns a copy of this grid with one existing cell's cost replaced.
    pub fn with_cost(&self, position: Position, cost: Cost) -> Result<Self, GridError> {
        let cell_index = self
            .index(position)
            .ok_or(GridError::OutsideGrid(position))?;
        if self.cells[cell_index].is_none() {
            return Err(GridError::Hole(position));
        }

        let mut grid = self.clone();
        grid.cells[cell_index] = Some(cost);
        grid.min_cost = grid.cells.iter().flatten().copied().min().unwrap_or(Cost::MAX);
        Ok(grid)
    }

    /// Converts a position to a flat cell index, if it lies inside the bounds.
    #[inline(always)]
    fn index(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.row.checked_sub(self.origin.row)?).ok()?;
        let col = usize::try_from(position.col.checked_sub(self.origin.col)?).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Cost of entering `position`, or `None` outside the grid or on a hole.
    #[inline]
    pub fn cost_at(&self, position: Position) -> Option<Cost> {
        self.index(position).and_then(|i| self.cells[i])
    }

    /// The maximum-coordinate corner.
    #[inline]
    pub fn target(&self) -> Position {
        self.target
    }

    #[inline]
    pub fn is_target(&self, position: Position) -> bool {
        position == self.target
    }

    /// The minimum-coordinate corner.
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells that carry a cost (holes excluded).
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Smallest cost of any cell.
    pub fn min_cost(&self) -> Cost {
        self.min_cost
    }

    /// Draws the grid with `route` overlaid.
    ///
    /// Cells entered by the route show the arrow of the step that entered
    /// them, holes show `#`, other cells show their cost (`+` above 9).
    /// Rows are separated by newlines with no trailing newline.
    pub fn format_route(&self, route: &Route) -> String {
        let mut canvas: Vec<char> = self
            .cells
            .iter()
            .map(|cell| match cell {
                None => '#',
                Some(cost) if *cost < 10 => char::from(b'0' + *cost as u8),
                Some(_) => '+',
            })
            .collect();

        for state in route.steps() {
            if let Some(i) = self.index(state.position) {
                canvas[i] = state.heading.arrow();
            }
        }

        canvas
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
