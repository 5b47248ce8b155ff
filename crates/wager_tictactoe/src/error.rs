//! Error types for the session and the search engine.

use super::{MoveError, Outcome, Phase};

/// Errors reported by [`Session`](super::Session) transitions.
///
/// Every variant except [`SessionError::InvalidState`] is a recoverable
/// rejection: the session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum SessionError {
    /// Stake outside the configured limits, or not a positive finite number.
    #[display("Invalid stake {}: must be between {} and {}", amount, min, max)]
    InvalidStake {
        /// Rejected amount.
        amount: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Start attempted without a stake.
    #[display("A stake is required before starting")]
    StakeRequired,

    /// Stake changes are only accepted while idle.
    #[display("Stake cannot change while the session is {}", _0)]
    StakeLocked(Phase),

    /// Start attempted outside the idle phase.
    #[display("Session already started ({})", _0)]
    AlreadyStarted(Phase),

    /// The move cannot be placed on the board.
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),

    /// Not the human's turn, or no game in progress.
    #[display("Not your turn")]
    NotYourTurn,

    /// The automated player's reply is still pending.
    #[display("Opponent is still thinking")]
    OpponentBusy,

    /// No automated reply is pending.
    #[display("No opponent move is pending")]
    NothingPending,

    /// The search engine was asked to move on a finished board.
    #[display("Invalid state: {}", _0)]
    InvalidState(SearchError),
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::IllegalMove(err)
    }
}

impl From<SearchError> for SessionError {
    fn from(err: SearchError) -> Self {
        SessionError::InvalidState(err)
    }
}

/// Precondition violation in the search engine.
///
/// Raised when asked for a move on a decided board (a full board is
/// always decided). Callers must check the
/// outcome first; seeing this error means the orchestration is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    /// The board already has an outcome.
    #[display("board is already decided ({})", _0)]
    AlreadyDecided(#[error(not(source))] Outcome),
}
