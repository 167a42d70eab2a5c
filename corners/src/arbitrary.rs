use quickcheck::{Arbitrary, Gen};

use crate::{execute_move, Board, Click, GameState};

#[derive(Clone, Debug)]
pub struct MoveSequence {
    pub cell_count: usize,
    pub seed_edges: bool,
    /// Some of these are off the board.
    pub clicks: Vec<Click>,
}

impl MoveSequence {
    pub fn board(&self) -> Board {
        let mut board = Board::new(self.cell_count).unwrap();
        if self.seed_edges {
            board.seed_edges();
        }
        board
    }

    /// The board after playing all clicks, skipping the illegal ones.
    pub fn played_board(&self) -> Board {
        let mut board = self.board();
        let mut state = GameState::new();
        for &click in &self.clicks {
            if let Ok((next_state, _)) = execute_move(&mut board, state, click) {
                state = next_state;
            }
        }
        board
    }
}

impl Arbitrary for MoveSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let cell_count = 1 + usize::from(u8::arbitrary(g) % 8);
        // One step outside of the board in each direction
        let range = cell_count as u8 + 2;
        let num_clicks = usize::arbitrary(g) % (4 * cell_count * cell_count + 1);
        let clicks = (0..num_clicks)
            .map(|_| {
                let x = (u8::arbitrary(g) % range) as i32 - 1;
                let y = (u8::arbitrary(g) % range) as i32 - 1;
                Click::new(x, y)
            })
            .collect();

        MoveSequence {
            cell_count,
            seed_edges: bool::arbitrary(g),
            clicks,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let cell_count = self.cell_count;
        let seed_edges = self.seed_edges;
        Box::new(self.clicks.shrink().map(move |clicks| MoveSequence {
            cell_count,
            seed_edges,
            clicks,
        }))
    }
}

impl Arbitrary for Click {
    fn arbitrary(g: &mut Gen) -> Self {
        Click::new(i8::arbitrary(g) as i32, i8::arbitrary(g) as i32)
    }
}
