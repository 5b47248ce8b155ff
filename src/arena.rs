//! Opponent-versus-opponent matches on a bare board.

use serde::Serialize;
use tracing::{debug, info, instrument};
use wager_tictactoe::{Board, Mark, Opponent, Outcome, SessionError};

/// Results of a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, derive_new::new)]
pub struct Tally {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Tied games.
    pub ties: u32,
}

/// Plays one game, `x` moving first. Returns the final board.
///
/// # Errors
///
/// [`SessionError::IllegalMove`] if an opponent picks a taken square.
#[instrument(skip_all, fields(x = x.name(), o = o.name()))]
pub fn play_game(x: &mut dyn Opponent, o: &mut dyn Opponent) -> Result<Board, SessionError> {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    while !board.winner().is_terminal() {
        let position = match to_move {
            Mark::X => x.choose(&board, Mark::X)?,
            Mark::O => o.choose(&board, Mark::O)?,
        };
        board.place(position, to_move)?;
        debug!(%to_move, position, "Played");
        to_move = to_move.opponent();
    }
    Ok(board)
}

/// Plays `games` games and counts the results.
#[instrument(skip(x, o))]
pub fn self_play(
    x: &mut dyn Opponent,
    o: &mut dyn Opponent,
    games: u32,
) -> Result<Tally, SessionError> {
    let mut tally = Tally::default();
    for _ in 0..games {
        match play_game(x, o)?.winner() {
            Outcome::Winner(Mark::X) => tally.x_wins += 1,
            Outcome::Winner(Mark::O) => tally.o_wins += 1,
            Outcome::Tie | Outcome::Undecided => tally.ties += 1,
        }
    }
    info!(?tally, "Series complete");
    Ok(tally)
}
