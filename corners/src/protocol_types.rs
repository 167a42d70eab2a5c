use serde::{Deserialize, Serialize};

/// The color held by one corner of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Nobody has claimed this corner yet.
    #[default]
    Neutral,
    Red,
    Green,
}

/// One of the two players. The player's color is what a move propagates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Green,
}

/// One of the two logical connection points of a cell.
///
/// This is a corner in the graph sense, not a screen position: depending on
/// the [`Orientation`] of the cell, the left corner is drawn at the top-left
/// or at the bottom-left of the square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// The direction of the diagonal along which a cell can be connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Top-left to bottom-right.
    DiagonalDown,
    /// Bottom-left to top-right.
    DiagonalUp,
}

/// A click on a single cell, identified by its coordinates.
///
/// Coordinates are signed so that clicks (and topology offsets) outside the
/// board can be represented and rejected instead of wrapping around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Click {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub fn color(self) -> Color {
        match self {
            Player::Red => Color::Red,
            Player::Green => Color::Green,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Green,
            Player::Green => Player::Red,
        }
    }
}

impl Side {
    pub fn flipped(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl Orientation {
    /// Cells alternate in checkerboard fashion, starting with
    /// [`Orientation::DiagonalDown`] at `(0, 0)`.
    pub fn of(x: i32, y: i32) -> Orientation {
        if (x + y).rem_euclid(2) == 0 {
            Orientation::DiagonalDown
        } else {
            Orientation::DiagonalUp
        }
    }
}

impl Click {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Neutral => write!(f, "neutral"),
            Color::Red => write!(f, "red"),
            Color::Green => write!(f, "green"),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color())
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl std::fmt::Display for Click {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Click`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickFromStrErr(String);

impl std::error::Error for ClickFromStrErr {}

impl std::fmt::Display for ClickFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expected a click of the form 'x,y', got '{}'", self.0)
    }
}

impl std::str::FromStr for Click {
    type Err = ClickFromStrErr;

    /// Parses `"x,y"`, e.g. `"3,1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClickFromStrErr(String::from(s));
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Click { x, y })
    }
}
