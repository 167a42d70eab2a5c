use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{Board, Click, DirtyCells, IllegalMove, MoveError, Player, Side};

/// Whose turn it is, and how many moves were accepted so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub turn: Player,
    /// Only used for diagnostics.
    pub move_counter: u32,
}

/// Summarizes the effects of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub click: Click,
    /// Whether the clicked cell is connected after the move.
    pub connected: bool,
    /// Every cell that needs to be redrawn, including the clicked one.
    pub dirty: DirtyCells,
    /// Starts at 1 for the first move of the game.
    pub move_number: u32,
}

impl GameState {
    /// Red moves first.
    pub fn new() -> Self {
        Self {
            turn: Player::Red,
            move_counter: 0,
        }
    }

    fn advance(self) -> Self {
        Self {
            turn: self.turn.opponent(),
            move_counter: self.move_counter + 1,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks whether the player whose turn it is may click this cell.
///
/// A cell can't be clicked when one of its corners already has the
/// opponent's color.
pub fn check_move(board: &Board, state: GameState, click: Click) -> Result<(), IllegalMove> {
    let cell = board
        .get(click.x, click.y)
        .ok_or(IllegalMove::OutOfBounds { click })?;
    let opponent = state.turn.opponent();
    for side in [Side::Left, Side::Right] {
        if cell.corner(side) == opponent.color() {
            return Err(IllegalMove::OpponentCorner {
                click,
                side,
                opponent,
            });
        }
    }
    Ok(())
}

/// All cells the player whose turn it is may click, in row-major order.
pub fn legal_moves(board: &Board, state: GameState) -> Vec<Click> {
    board
        .iter()
        .map(|cell| Click::new(cell.x(), cell.y()))
        .filter(|&click| check_move(board, state, click).is_ok())
        .collect()
}

/// Plays one move: toggles the connection of the clicked cell and propagates
/// the mover's color from both of its corners.
///
/// On success, the board is updated and the state for the next move is
/// returned. On failure, neither the board nor the state change: an
/// [`IllegalMove`] is rejected before anything is written, and an
/// [`InvariantViolation`](crate::InvariantViolation) aborts the move after it
/// was computed on a copy of the board.
pub fn execute_move(
    board: &mut Board,
    state: GameState,
    click: Click,
) -> Result<(GameState, MoveOutcome), MoveError> {
    check_move(board, state, click)?;

    let player = state.turn;
    let mut next_board = board.clone();
    let (connected, dirty) = apply_move(&mut next_board, player, click).map_err(|err| {
        error!(%click, %player, %err, "Move aborted");
        err
    })?;
    *board = next_board;

    let next_state = state.advance();
    debug!(
        move_number = next_state.move_counter,
        %player,
        %click,
        connected,
        dirty_cells = dirty.len(),
        "Move played"
    );
    Ok((
        next_state,
        MoveOutcome {
            player,
            click,
            connected,
            dirty,
            move_number: next_state.move_counter,
        },
    ))
}

fn apply_move(
    board: &mut Board,
    player: Player,
    click: Click,
) -> Result<(bool, DirtyCells), MoveError> {
    let Click { x, y } = click;
    let connected = board
        .get_mut(x, y)
        .ok_or(IllegalMove::OutOfBounds { click })?
        .toggle_connected();

    let mut dirty = DirtyCells::new();
    dirty.insert(x, y);
    for side in [Side::Left, Side::Right] {
        dirty.extend(board.propagate_player(x, y, side, player)?);
    }

    // The propagation only ever writes one color, so this can only fail when
    // the board was already broken before the move.
    for (x, y) in dirty.iter() {
        if let Some(cell) = board.get(x, y) {
            cell.check_invariant()?;
        }
    }
    Ok((connected, dirty))
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveSequence;
    use crate::{Color, InvariantViolation};

    fn seeded_board(cell_count: usize) -> Board {
        let mut board = Board::new(cell_count).unwrap();
        board.seed_edges();
        board
    }

    #[test]
    fn first_move_connects_and_propagates() {
        let mut board = seeded_board(4);
        let (state, outcome) =
            execute_move(&mut board, GameState::new(), Click::new(0, 0)).unwrap();

        let cell = board.get(0, 0).unwrap();
        assert!(cell.connected());
        assert_eq!(cell.left_color(), Color::Red);
        assert_eq!(cell.right_color(), Color::Red);
        // The right corner of the diagonal-down cell (0, 0) touches these
        assert_eq!(board.get(1, 1).unwrap().left_color(), Color::Red);
        assert_eq!(board.get(1, 0).unwrap().left_color(), Color::Red);
        assert_eq!(board.get(0, 1).unwrap().right_color(), Color::Red);

        assert_eq!(
            state,
            GameState {
                turn: Player::Green,
                move_counter: 1
            }
        );
        assert_eq!(outcome.player, Player::Red);
        assert!(outcome.connected);
        assert_eq!(outcome.move_number, 1);
        assert_eq!(
            outcome.dirty.iter().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn clicking_opponent_corner_is_rejected() {
        let mut board = seeded_board(4);
        let before = board.clone();
        // (3, 1) carries green's anchor on its right corner
        let err = execute_move(&mut board, GameState::new(), Click::new(3, 1)).unwrap_err();
        assert_eq!(
            err,
            MoveError::Illegal(IllegalMove::OpponentCorner {
                click: Click::new(3, 1),
                side: Side::Right,
                opponent: Player::Green,
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn clicking_outside_is_rejected() {
        let mut board = seeded_board(4);
        let err = execute_move(&mut board, GameState::new(), Click::new(4, 0)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal(IllegalMove::OutOfBounds { .. })
        ));
    }

    #[test]
    fn move_extends_the_anchor() {
        let mut board = seeded_board(4);
        // (0, 1) is diagonal-up, its left corner holds red's anchor
        let (_, outcome) =
            execute_move(&mut board, GameState::new(), Click::new(0, 1)).unwrap();
        assert!(outcome.connected);
        // The right corner of (0, 1) touches (1, 0).left, (1, 1).left and (0, 0).right
        assert_eq!(board.get(1, 0).unwrap().left_color(), Color::Red);
        assert_eq!(board.get(1, 1).unwrap().left_color(), Color::Red);
        assert_eq!(board.get(0, 0).unwrap().right_color(), Color::Red);
        assert_eq!(board.get(0, 2).unwrap().left_color(), Color::Red);
    }

    #[test]
    fn toggling_own_connection_off_keeps_colors() {
        let mut board = seeded_board(4);
        let (state, _) = execute_move(&mut board, GameState::new(), Click::new(0, 0)).unwrap();
        let (state, _) = execute_move(&mut board, state, Click::new(2, 3)).unwrap();
        let (state, outcome) = execute_move(&mut board, state, Click::new(0, 0)).unwrap();
        assert!(!outcome.connected);
        assert_eq!(state.move_counter, 3);
        let cell = board.get(0, 0).unwrap();
        assert!(!cell.connected());
        assert_eq!(cell.left_color(), Color::Red);
        assert_eq!(cell.right_color(), Color::Red);
    }

    #[test]
    fn opponent_cannot_undo_a_connection() {
        let mut board = seeded_board(4);
        let (state, _) = execute_move(&mut board, GameState::new(), Click::new(0, 0)).unwrap();
        assert_eq!(state.turn, Player::Green);
        let err = execute_move(&mut board, state, Click::new(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal(IllegalMove::OpponentCorner {
                opponent: Player::Red,
                ..
            })
        ));
        assert!(board.get(0, 0).unwrap().connected());
    }

    #[test]
    fn broken_board_aborts_move_without_changes() {
        let mut board = Board::new(4).unwrap();
        board.propagate_corner(2, 2, Side::Left, Color::Green);
        // Connected, but with a neutral left corner and a green right corner.
        // Normal play can't produce this.
        board.get_mut(1, 1).unwrap().toggle_connected();
        let before = board.clone();

        let err = execute_move(&mut board, GameState::new(), Click::new(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Defect(InvariantViolation::ColorClash {
                x: 1,
                y: 1,
                side: Side::Right,
                ..
            })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_of_alternating_moves_terminates() {
        for cell_count in [1, 2, 5, 12] {
            let mut board = seeded_board(cell_count);
            let mut state = GameState::new();
            // Keep clicking the first legal cell until nobody can move, or
            // every cell was toggled a few times.
            let max_moves = 3 * (cell_count * cell_count) as u32;
            while state.move_counter < max_moves {
                let Some(&click) = legal_moves(&board, state).first() else {
                    break;
                };
                state = execute_move(&mut board, state, click).unwrap().0;
                assert!(board.check_invariants().is_ok());
            }
        }
    }

    #[test]
    fn legal_moves_on_fresh_board() {
        let board = seeded_board(4);
        let red = legal_moves(&board, GameState::new());
        // Green's anchor blocks (3, 1) and (3, 2)
        assert_eq!(red.len(), 14);
        assert!(!red.contains(&Click::new(3, 1)));
        assert!(!red.contains(&Click::new(3, 2)));
    }

    quickcheck! {
        fn clicks_off_the_board_are_out_of_bounds(input: MoveSequence, click: Click) -> bool {
            let board = input.played_board();
            let result = check_move(&board, GameState::new(), click);
            if board.is_in_bounds(click.x, click.y) {
                !matches!(result, Err(IllegalMove::OutOfBounds { .. }))
            } else {
                result == Err(IllegalMove::OutOfBounds { click })
            }
        }

        fn invariants_hold_for_every_reachable_board(input: MoveSequence) -> bool {
            let mut board = input.board();
            let mut state = GameState::new();
            for click in input.clicks {
                match execute_move(&mut board, state, click) {
                    Ok((next_state, _)) => state = next_state,
                    Err(MoveError::Illegal(_)) => {}
                    Err(MoveError::Defect(_)) => return false,
                }
                if board.check_invariants().is_err() {
                    return false;
                }
            }
            true
        }

        fn illegal_moves_change_nothing(input: MoveSequence) -> bool {
            let mut board = input.board();
            let mut state = GameState::new();
            for click in input.clicks {
                let before = board.clone();
                match execute_move(&mut board, state, click) {
                    Ok((next_state, outcome)) => {
                        if next_state.turn == state.turn || outcome.click != click {
                            return false;
                        }
                        state = next_state;
                    }
                    Err(_) => {
                        if board != before {
                            return false;
                        }
                    }
                }
            }
            true
        }

        fn dirty_cells_cover_every_change(input: MoveSequence) -> bool {
            let mut board = input.board();
            let mut state = GameState::new();
            for click in input.clicks {
                let before = board.clone();
                if let Ok((next_state, outcome)) = execute_move(&mut board, state, click) {
                    state = next_state;
                    let all_changes_dirty = before
                        .iter()
                        .zip(board.iter())
                        .filter(|(old, new)| old != new)
                        .all(|(_, new)| outcome.dirty.contains(new.x(), new.y()));
                    if !all_changes_dirty {
                        return false;
                    }
                }
            }
            true
        }
    }
}
