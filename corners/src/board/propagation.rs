use std::collections::{BTreeSet, HashSet};

use tracing::trace;

use crate::{neighbors_of, Board, Cell, Color, InvariantViolation, Player, Side};

/// The cells whose state changed during an operation, for redrawing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyCells(BTreeSet<(i32, i32)>);

impl DirtyCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, x: i32, y: i32) {
        self.0.insert((x, y));
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.0.contains(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the coordinates in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.0.iter().copied()
    }

    pub fn extend(&mut self, other: DirtyCells) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for DirtyCells {
    type Item = (i32, i32);
    type IntoIter = std::collections::btree_set::IntoIter<(i32, i32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Board {
    /// Pushes `color` into the `side` corner of the cell `(x, y)` and from
    /// there across every touching corner, until all reachable corners hold
    /// `color`.
    ///
    /// Propagation continues through the touching corners of neighboring
    /// cells, and through the other corner of every connected cell it reaches.
    /// It stops at corners that already hold `color`, and at the edge of the
    /// board. Starting off the board is a no-op.
    ///
    /// Whatever color a reached corner had is overwritten. For moves, use
    /// [`Self::propagate_player()`], which refuses to overwrite the opponent.
    pub fn propagate_corner(&mut self, x: i32, y: i32, side: Side, color: Color) -> DirtyCells {
        let mut dirty = DirtyCells::new();
        self.walk(x, y, side, color, &mut dirty, |_, _| true);
        dirty
    }

    /// Like [`Self::propagate_corner()`] with the player's color, but fails
    /// when a corner holding the opponent's color is reached.
    ///
    /// Legal moves never get there. On failure, the board is left half-way
    /// through the propagation and must be discarded.
    pub fn propagate_player(
        &mut self,
        x: i32,
        y: i32,
        side: Side,
        player: Player,
    ) -> Result<DirtyCells, InvariantViolation> {
        let opponent = player.opponent().color();
        let propagated = player.color();
        let mut clash = None;
        let mut dirty = DirtyCells::new();
        self.walk(x, y, side, propagated, &mut dirty, |cell, side| {
            let existing = cell.corner(side);
            if existing == opponent {
                clash = Some(InvariantViolation::ColorClash {
                    x: cell.x(),
                    y: cell.y(),
                    side,
                    existing,
                    propagated,
                });
                false
            } else {
                true
            }
        });
        match clash {
            Some(err) => Err(err),
            None => Ok(dirty),
        }
    }

    // Depth-first walk with an explicit stack, since recursion depth could
    // otherwise grow with the number of cells.
    //
    // `may_overwrite` is asked before a corner is recolored; returning false
    // stops the whole walk.
    fn walk<F>(
        &mut self,
        x: i32,
        y: i32,
        side: Side,
        color: Color,
        dirty: &mut DirtyCells,
        mut may_overwrite: F,
    ) where
        F: FnMut(&Cell, Side) -> bool,
    {
        let mut worklist = vec![(x, y, side)];
        let mut visited = HashSet::new();

        while let Some((x, y, side)) = worklist.pop() {
            if !visited.insert((x, y, side)) {
                continue;
            }
            let Some(cell) = self.get_mut(x, y) else {
                continue;
            };
            if cell.corner(side) == color {
                continue;
            }
            if !may_overwrite(&*cell, side) {
                return;
            }
            cell.set_corner(side, color);
            dirty.insert(x, y);
            trace!(x, y, %side, %color, "Corner recolored");

            // Pushed in reverse, so that neighbors are visited before the other corner
            if cell.connected() {
                worklist.push((x, y, side.flipped()));
            }
            let neighbors = neighbors_of(x, y, cell.orientation(), side);
            worklist.extend(neighbors.iter().rev().map(|nb| (nb.x, nb.y, nb.side)));
        }
    }
}
