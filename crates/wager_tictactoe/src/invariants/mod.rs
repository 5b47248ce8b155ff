//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold after every applied
//! move. They are checked in debug builds and can be tested on their own.

pub mod alternating_turn;
pub mod move_count;

pub use alternating_turn::AlternatingTurnInvariant;
pub use move_count::MoveCountInvariant;

use super::{Board, Mark, Move};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (MoveCountInvariant, AlternatingTurnInvariant);

/// Borrowed view of a game: the board plus the moves that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Board after `history` was played.
    pub board: &'a Board,
    /// Moves in play order.
    pub history: &'a [Move],
}

impl<'a> Snapshot<'a> {
    /// Creates a snapshot.
    pub fn new(board: &'a Board, history: &'a [Move]) -> Self {
        Self { board, history }
    }

    /// Mark expected to play next (X on even move counts).
    pub fn to_move(&self) -> Mark {
        if self.history.len() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}
