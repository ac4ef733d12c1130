//! Text input for cost grids.
//!
//! One row per line, one character per cell: `0`-`9` give the cell's cost and
//! `#` leaves a hole. Blank lines are ignored and `\r\n` endings are accepted.

use crate::error::ParseError;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::solver::Cost;

/// Marker for a cell the mover can never enter.
pub const HOLE: char = '#';

/// What a single input character stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Cost(Cost),
    Hole,
}

/// Classifies one input character, or `None` if it is not a cell.
pub fn parse_cell(ch: char) -> Option<Cell> {
    match ch {
        HOLE => Some(Cell::Hole),
        _ => ch.to_digit(10).map(|digit| Cell::Cost(Cost::from(digit))),
    }
}

/// Parses a whole grid.
///
/// Line and column numbers in errors are 1-based and count blank lines.
pub fn parse_grid(input: &str) -> Result<Grid, ParseError> {
    let mut cells = Vec::new();
    let mut row = 0;

    for (line_index, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        for (col, ch) in line.chars().enumerate() {
            match parse_cell(ch) {
                Some(Cell::Cost(cost)) => cells.push((Position::new(row, col as i32), cost)),
                Some(Cell::Hole) => {}
                None => {
                    return Err(ParseError::InvalidCell {
                        line: line_index + 1,
                        column: col + 1,
                        found: ch,
                    })
                }
            }
        }
        row += 1;
    }

    Ok(Grid::from_cells(cells)?)
}
