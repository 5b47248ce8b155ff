//! Staked tic-tac-toe core.
//!
//! Pure game logic with no I/O:
//!
//! - **Board**: [`Board`], [`Square`], [`Mark`] and the line-based
//!   [`rules`].
//! - **Search**: full-depth minimax in [`search`], behind the
//!   [`Opponent`] trait.
//! - **Session**: the idle → playing → finished state machine
//!   ([`Session`]).
//! - **Settlement**: stake limits and the payout function
//!   ([`settlement`]).
//!
//! # Example
//!
//! ```
//! use wager_tictactoe::{Outcome, Phase, Session};
//!
//! let mut session = Session::new();
//! session.configure_stake(0.01)?;
//! session.start()?;
//! session.submit_move(0)?;
//! assert_eq!(session.board().get(4).and_then(|s| s.mark()), Some(wager_tictactoe::Mark::O));
//! assert_eq!(session.phase(), Phase::Playing);
//! assert_eq!(session.outcome(), Outcome::Undecided);
//! # Ok::<(), wager_tictactoe::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod error;
pub mod invariants;
mod outcome;
mod position;
pub mod rules;
pub mod search;
mod session;
pub mod settlement;
mod types;

pub use action::{Move, MoveError};
pub use error::{SearchError, SessionError};
pub use outcome::{Outcome, Phase};
pub use position::Position;
pub use search::{FirstOpen, Minimax, Opponent, best_move};
pub use session::{AUTOMATED, HUMAN, Session};
pub use settlement::{PayoutRules, Settlement, StakeLimits, payout};
pub use types::{BOARD_SIZE, Board, Mark, Square};
