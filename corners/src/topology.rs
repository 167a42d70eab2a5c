use crate::{Orientation, Side};

/// A corner of a (possibly off-board) cell that touches another corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbor {
    pub x: i32,
    pub y: i32,
    pub side: Side,
}

/// The three corners that touch the `side` corner of the cell at `(x, y)`.
///
/// The order is fixed: diagonal cell, horizontal cell, vertical cell. Nothing
/// here knows about the board size, so coordinates may lie outside of it; see
/// [`Board::neighbors()`](crate::Board::neighbors) for the filtered version.
///
/// For a [`Orientation::DiagonalDown`] cell, the left corner touches the right
/// corners of `(x-1, y-1)` and `(x-1, y)` and the left corner of `(x, y-1)`.
/// [`Orientation::DiagonalUp`] cells use the same offsets mirrored vertically.
pub fn neighbors_of(x: i32, y: i32, orientation: Orientation, side: Side) -> [Neighbor; 3] {
    // The vertical direction in which the corner lies.
    let dy = match orientation {
        Orientation::DiagonalDown => -1,
        Orientation::DiagonalUp => 1,
    };
    let (dx, dy, other) = match side {
        Side::Left => (-1, dy, Side::Right),
        Side::Right => (1, -dy, Side::Left),
    };
    [
        Neighbor { x: x + dx, y: y + dy, side: other },
        Neighbor { x: x + dx, y, side: other },
        Neighbor { x, y: y + dy, side },
    ]
}
