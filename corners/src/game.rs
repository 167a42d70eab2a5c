use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    execute_move, legal_moves, Board, BoardError, Click, DirtyCells, GameState, MoveError,
    MoveOutcome, Player,
};

/// A board together with the turn state, for front-ends that drive a single game.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Game {
    /// Creates a new game, with the starting anchors placed if `seed_edges` is set.
    ///
    /// Also returns the cells colored by the anchors, so that they can be drawn.
    pub fn new(cell_count: usize, seed_edges: bool) -> Result<(Self, DirtyCells), BoardError> {
        let mut board = Board::new(cell_count)?;
        let dirty = if seed_edges {
            board.seed_edges()
        } else {
            DirtyCells::new()
        };
        let game = Self {
            board,
            state: GameState::new(),
        };
        Ok((game, dirty))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn(&self) -> Player {
        self.state.turn
    }

    /// Handles a click on a cell. See [`execute_move()`].
    pub fn play(&mut self, click: Click) -> Result<MoveOutcome, MoveError> {
        let (state, outcome) = execute_move(&mut self.board, self.state, click)?;
        self.state = state;
        Ok(outcome)
    }

    pub fn legal_moves(&self) -> Vec<Click> {
        legal_moves(&self.board, self.state)
    }

    /// Picks one of the legal moves uniformly at random, if there are any.
    pub fn random_legal_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Click> {
        self.legal_moves().choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::Color;

    #[test]
    fn new_game_places_anchors() {
        let (game, dirty) = Game::new(20, true).unwrap();
        assert_eq!(game.turn(), Player::Red);
        assert_eq!(game.board().get(0, 9).unwrap().left_color(), Color::Red);
        assert_eq!(game.board().get(19, 9).unwrap().right_color(), Color::Green);
        assert!(dirty.contains(0, 9));
        assert!(dirty.contains(19, 9));

        let (game, dirty) = Game::new(20, false).unwrap();
        assert!(dirty.is_empty());
        assert_eq!(game.legal_moves().len(), 400);
    }

    #[test]
    fn play_advances_turn_only_on_accepted_moves() {
        let (mut game, _) = Game::new(4, true).unwrap();
        assert!(game.play(Click::new(3, 1)).is_err());
        assert_eq!(game.turn(), Player::Red);
        assert_eq!(game.state().move_counter, 0);
        let outcome = game.play(Click::new(1, 2)).unwrap();
        assert_eq!(outcome.player, Player::Red);
        assert_eq!(game.turn(), Player::Green);
    }

    #[test]
    fn random_playout_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let (mut game, _) = Game::new(10, true).unwrap();
        for _ in 0..300 {
            let Some(click) = game.random_legal_move(&mut rng) else {
                break;
            };
            game.play(click).unwrap();
            assert!(game.board().check_invariants().is_ok());
        }
        assert!(game.state().move_counter > 0);
    }
}
