//! Contract-based move validation.
//!
//! Contracts pair a precondition checked before a move is applied with a
//! postcondition checked on the resulting state: {P} action {Q}.

use super::invariants::{GameInvariants, InvariantSet, Snapshot};
use super::{Move, MoveError};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Error produced when a condition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

/// Contract for placing a mark.
///
/// Preconditions: the index is on the board, the square is empty, and the
/// mark is the side to move.
///
/// Postconditions: exactly one more square is filled and every
/// [`GameInvariants`] member holds.
pub struct MoveContract;

impl<'a> Contract<Snapshot<'a>, Move> for MoveContract {
    type Error = MoveError;

    #[instrument(level = "trace", skip(game))]
    fn pre(game: &Snapshot<'a>, action: &Move) -> Result<(), MoveError> {
        match game.board.get(action.position) {
            None => return Err(MoveError::OutOfRange(action.position)),
            Some(square) if square.mark().is_some() => {
                return Err(MoveError::Occupied(action.position));
            }
            Some(_) => {}
        }
        if action.mark != game.to_move() {
            return Err(MoveError::OutOfTurn(action.mark));
        }
        Ok(())
    }

    #[instrument(level = "trace", skip_all)]
    fn post(before: &Snapshot<'a>, after: &Snapshot<'a>) -> Result<(), MoveError> {
        if after.board.filled() != before.board.filled() + 1 {
            warn!(
                before = before.board.filled(),
                after = after.board.filled(),
                "Move did not fill exactly one square"
            );
            return Err(MoveError::InvariantViolation(
                "Exactly one square changes per move".to_string(),
            ));
        }
        GameInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
