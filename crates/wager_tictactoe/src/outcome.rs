//! Game outcome and session phase.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Result of a board, always derived from the squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty squares remain.
    #[default]
    Undecided,
    /// A mark completed a line.
    Winner(Mark),
    /// Board full with no completed line.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Undecided | Outcome::Tie => None,
        }
    }

    /// Returns true once the game is decided.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "Undecided"),
            Outcome::Winner(mark) => write!(f, "Player {} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Lifecycle phase of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// Waiting for a stake and a start.
    #[default]
    Idle,
    /// Moves are accepted.
    Playing,
    /// Outcome decided; only reset is accepted.
    Finished,
}
