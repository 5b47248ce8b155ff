//! Move selection for the automated player.
//!
//! [`best_move`] runs a full-depth minimax over the remaining squares. The
//! tree is at most 9! leaves, so there is no pruning, depth limit or clock.
//!
//! Leaf scores are taken from the searching side's point of view:
//!
//! - own win: `10 - depth`
//! - opponent win: `depth - 10`
//! - tie: `0`
//!
//! The depth term prefers faster wins and slower losses. At the root,
//! candidates are tried in ascending index order and only a strictly
//! greater score replaces the current best, so the lowest index wins ties.

use super::{Board, Mark, Outcome, SearchError};
use tracing::{debug, instrument};

/// Score of a win found at depth zero.
pub const WIN_SCORE: i32 = 10;

/// Recursive minimax evaluation.
///
/// `me` is the maximizing mark. `maximizing` says whose turn it is at
/// this level. The board is mutated while exploring and restored before
/// returning.
pub fn minimax(board: &mut Board, depth: i32, maximizing: bool, me: Mark) -> i32 {
    match board.winner() {
        Outcome::Winner(mark) if mark == me => return WIN_SCORE - depth,
        Outcome::Winner(_) => return depth - WIN_SCORE,
        Outcome::Tie => return 0,
        Outcome::Undecided => {}
    }

    let to_play = if maximizing { me } else { me.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in 0..9 {
        if !board.is_empty(pos) {
            continue;
        }
        board.set_unchecked(pos, to_play);
        let score = minimax(board, depth + 1, !maximizing, me);
        board.clear(pos);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// Root score of every empty square for `me`, in ascending index order.
///
/// # Errors
///
/// Returns [`SearchError::AlreadyDecided`] if the board has an outcome.
#[instrument(level = "debug", skip(board))]
pub fn scores(board: &Board, me: Mark) -> Result<Vec<(usize, i32)>, SearchError> {
    let outcome = board.winner();
    if outcome.is_terminal() {
        return Err(SearchError::AlreadyDecided(outcome));
    }

    // Work on a copy; the caller's board is never touched.
    let mut scratch = *board;
    let candidates: Vec<usize> = board.empty_positions().collect();
    Ok(candidates
        .into_iter()
        .map(|pos| {
            scratch.set_unchecked(pos, me);
            let score = minimax(&mut scratch, 0, false, me);
            scratch.clear(pos);
            (pos, score)
        })
        .collect())
}

/// Optimal square for `me` under full-depth minimax.
///
/// Ties go to the lowest index.
///
/// # Errors
///
/// Returns [`SearchError::AlreadyDecided`] if the board has an outcome.
#[instrument(level = "debug", skip(board), fields(filled = board.filled()))]
pub fn best_move(board: &Board, me: Mark) -> Result<usize, SearchError> {
    let mut best_score = i32::MIN;
    let mut best_pos = None;
    for (pos, score) in scores(board, me)? {
        if score > best_score {
            best_score = score;
            best_pos = Some(pos);
        }
    }

    // An undecided board always has an empty square.
    let pos = best_pos.ok_or(SearchError::AlreadyDecided(Outcome::Tie))?;
    debug!(position = pos, score = best_score, "Selected move");
    Ok(pos)
}

/// Something that picks the automated player's square.
pub trait Opponent: std::fmt::Debug {
    /// Chooses an empty square for `me` on an undecided board.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the board is already decided.
    fn choose(&mut self, board: &Board, me: Mark) -> Result<usize, SearchError>;

    /// Display name.
    fn name(&self) -> &str;
}

impl Opponent for Box<dyn Opponent> {
    fn choose(&mut self, board: &Board, me: Mark) -> Result<usize, SearchError> {
        (**self).choose(board, me)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Perfect player backed by [`best_move`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl Opponent for Minimax {
    fn choose(&mut self, board: &Board, me: Mark) -> Result<usize, SearchError> {
        best_move(board, me)
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Weak player that takes the first empty square.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOpen;

impl Opponent for FirstOpen {
    fn choose(&mut self, board: &Board, _me: Mark) -> Result<usize, SearchError> {
        let outcome = board.winner();
        if outcome.is_terminal() {
            return Err(SearchError::AlreadyDecided(outcome));
        }
        board
            .empty_positions()
            .next()
            .ok_or(SearchError::AlreadyDecided(outcome))
    }

    fn name(&self) -> &str {
        "first-open"
    }
}
