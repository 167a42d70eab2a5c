use serde::{Deserialize, Serialize};

use crate::{Color, InvariantViolation, Orientation, Side};

/// A single square of the board.
///
/// A cell has two corners (in the graph sense), each holding a [`Color`], and
/// may be connected, which links its two corners into one unit of the same
/// color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
    orientation: Orientation,
    left_color: Color,
    right_color: Color,
    connected: bool,
}

// Keeping the two corners of a connected cell the same color is the job of the
// propagation engine, not of the setters here.
impl Cell {
    /// Creates a neutral, unconnected cell. The orientation follows from the coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::of(x, y),
            left_color: Color::Neutral,
            right_color: Color::Neutral,
            connected: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn left_color(&self) -> Color {
        self.left_color
    }

    pub fn right_color(&self) -> Color {
        self.right_color
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// The color of the given corner.
    pub fn corner(&self, side: Side) -> Color {
        match side {
            Side::Left => self.left_color,
            Side::Right => self.right_color,
        }
    }

    /// Sets the color of one corner.
    ///
    /// Returns whether anything changed.
    pub fn set_corner(&mut self, side: Side, color: Color) -> bool {
        let slot = match side {
            Side::Left => &mut self.left_color,
            Side::Right => &mut self.right_color,
        };
        if *slot == color {
            false
        } else {
            *slot = color;
            true
        }
    }

    /// Flips whether the two corners are connected, and returns the new value.
    pub fn toggle_connected(&mut self) -> bool {
        self.connected = !self.connected;
        self.connected
    }

    /// Does either corner hold this color?
    pub fn has_color(&self, color: Color) -> bool {
        self.left_color == color || self.right_color == color
    }

    /// Checks that a connected cell has the same color on both corners.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        if self.connected && self.left_color != self.right_color {
            return Err(InvariantViolation::ConnectedCornersDiffer {
                x: self.x,
                y: self.y,
                left: self.left_color,
                right: self.right_color,
            });
        }
        Ok(())
    }
}
