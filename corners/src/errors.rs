use crate::{Click, Color, Player, Side};

/// The error type for [`execute_move()`](crate::execute_move) when the click is rejected.
///
/// An illegal move never changes the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { click: Click },
    OpponentCorner { click: Click, side: Side, opponent: Player },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { click } => {
                write!(f, "The cell {} is outside of the board", click)
            }
            IllegalMove::OpponentCorner {
                click,
                side,
                opponent,
            } => write!(
                f,
                "The {} corner of the cell {} already belongs to {}",
                side, click, opponent
            ),
        }
    }
}

/// A board state that no sequence of legal moves can produce.
///
/// Seeing one of these means there's a bug in the legality check or in the
/// propagation, so it's reported rather than repaired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    ConnectedCornersDiffer {
        x: i32,
        y: i32,
        left: Color,
        right: Color,
    },
    ColorClash {
        x: i32,
        y: i32,
        side: Side,
        existing: Color,
        propagated: Color,
    },
}

impl std::error::Error for InvariantViolation {}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::ConnectedCornersDiffer { x, y, left, right } => write!(
                f,
                "The cell ({}, {}) is connected, but its corners are {} and {}",
                x, y, left, right
            ),
            InvariantViolation::ColorClash {
                x,
                y,
                side,
                existing,
                propagated,
            } => write!(
                f,
                "Propagating {} would overwrite the {} {} corner of the cell ({}, {})",
                propagated, existing, side, x, y
            ),
        }
    }
}

/// The error type for one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The move was rejected, the game goes on.
    Illegal(IllegalMove),
    /// The move was aborted because it would corrupt the board.
    Defect(InvariantViolation),
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Illegal(err) => Some(err),
            MoveError::Defect(err) => Some(err),
        }
    }
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Illegal(_) => write!(f, "Illegal move"),
            MoveError::Defect(_) => write!(f, "Board invariant violated, move aborted"),
        }
    }
}

impl From<IllegalMove> for MoveError {
    fn from(err: IllegalMove) -> Self {
        MoveError::Illegal(err)
    }
}

impl From<InvariantViolation> for MoveError {
    fn from(err: InvariantViolation) -> Self {
        MoveError::Defect(err)
    }
}

/// The error type for [`Board::new()`](crate::Board::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    EmptyBoard,
    TooLarge { cell_count: usize },
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::EmptyBoard => write!(f, "A board needs at least one cell"),
            BoardError::TooLarge { cell_count } => {
                write!(f, "A board with {} cells per side is too large", cell_count)
            }
        }
    }
}
