mod propagation;

use std::ops::Deref;

pub use propagation::*;

use crate::{neighbors_of, BoardError, Cell, Color, InvariantViolation, Neighbor, Side};

/// A square grid of cells, `cell_count` cells on each side.
///
/// The board owns all cells and knows how to push colors across them, but it
/// doesn't know whose turn it is; see [`execute_move()`](crate::execute_move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cell_count: i32,
    /// Row-major, i.e. the cell `(x, y)` is at index `y * cell_count + x`.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of neutral, unconnected cells.
    pub fn new(cell_count: usize) -> Result<Self, BoardError> {
        if cell_count == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let n = i32::try_from(cell_count)
            .ok()
            .filter(|n| n.checked_mul(*n).is_some())
            .ok_or(BoardError::TooLarge { cell_count })?;
        let mut cells = Vec::with_capacity(cell_count * cell_count);
        for y in 0..n {
            for x in 0..n {
                cells.push(Cell::new(x, y));
            }
        }
        Ok(Self {
            cell_count: n,
            cells,
        })
    }

    /// The number of cells in each row and column.
    pub fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.cell_count).contains(&x) && (0..self.cell_count).contains(&y)
    }

    /// Returns the cell at the given coordinates, or `None` if they are off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// The corners touching the `side` corner of the cell `(x, y)` that lie on the board.
    pub fn neighbors(&self, x: i32, y: i32, side: Side) -> impl Iterator<Item = Neighbor> + '_ {
        let orientation = crate::Orientation::of(x, y);
        neighbors_of(x, y, orientation, side)
            .into_iter()
            .filter(|nb| self.is_in_bounds(nb.x, nb.y))
    }

    /// Returns the first cell that is connected but has corners of different colors.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.cells.iter().try_for_each(Cell::check_invariant)
    }

    /// The row on which the starting anchors are placed.
    pub fn middle_row(&self) -> i32 {
        (self.cell_count - 1) / 2
    }

    /// Gives each player a fixed starting anchor before the first move.
    ///
    /// Red gets the left corner of the leftmost cell of the middle row, green
    /// gets the right corner of the rightmost one. Both colors are propagated
    /// like any other move.
    pub fn seed_edges(&mut self) -> DirtyCells {
        let (last, middle) = (self.cell_count - 1, self.middle_row());
        let mut dirty = self.propagate_corner(0, middle, Side::Left, Color::Red);
        dirty.extend(self.propagate_corner(last, middle, Side::Right, Color::Green));
        dirty
    }

    /// Iterates over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cell_count as usize)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_in_bounds(x, y) {
            Some((y * self.cell_count + x) as usize)
        } else {
            None
        }
    }
}

impl Deref for Board {
    type Target = [Cell];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}
