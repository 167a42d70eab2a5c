use corners::{Click, Game, MoveError};
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::recording::{MoveRecord, Recorder};

/// Counts of what happened during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Plays the given clicks in order, skipping illegal ones.
///
/// Returns an error only when the board gets corrupted, not when an illegal
/// move is played.
pub fn play_clicks(
    game: &mut Game,
    clicks: impl IntoIterator<Item = Click>,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    for click in clicks {
        play_click(game, click, recorder, &mut summary)?;
    }
    Ok(summary)
}

/// Lets both players click random legal cells for up to `num_moves` moves.
///
/// Stops early when the player to move has no legal move left.
pub fn play_random(
    game: &mut Game,
    rng: &mut StdRng,
    num_moves: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    for _ in 0..num_moves {
        let Some(click) = game.random_legal_move(rng) else {
            info!(player = %game.turn(), "No legal move left");
            break;
        };
        play_click(game, click, recorder, &mut summary)?;
    }
    Ok(summary)
}

fn play_click(
    game: &mut Game,
    click: Click,
    recorder: &mut Option<Recorder>,
    summary: &mut SessionSummary,
) -> anyhow::Result<()> {
    let player = game.turn();
    match game.play(click) {
        Ok(outcome) => {
            debug!(
                move_number = outcome.move_number,
                %player,
                %click,
                connected = outcome.connected,
                "Accepted"
            );
            summary.accepted += 1;
            if let Some(rec) = recorder {
                rec.store(MoveRecord {
                    move_number: Some(outcome.move_number),
                    player,
                    click,
                    accepted: true,
                    message: None,
                });
            }
        }
        Err(err @ MoveError::Illegal(_)) => {
            info!(%player, %click, "Illegal move");
            let mut err_dyn = &err as &dyn std::error::Error;
            while let Some(src_err) = err_dyn.source() {
                info!("{}", err_dyn);
                err_dyn = src_err;
            }
            info!("{}", err_dyn);
            summary.rejected += 1;
            if let Some(rec) = recorder {
                rec.store(MoveRecord {
                    move_number: None,
                    player,
                    click,
                    accepted: false,
                    message: Some(err_dyn.to_string()),
                });
            }
        }
        Err(err @ MoveError::Defect(_)) => {
            return Err(anyhow::Error::new(err).context(format!("{} clicked {}", player, click)));
        }
    }
    Ok(())
}
