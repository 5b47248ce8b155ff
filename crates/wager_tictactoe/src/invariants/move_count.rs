//! Move count invariant: one filled square per move played.

use super::{Invariant, Snapshot};
use crate::Square;

/// Invariant: the board holds exactly the squares named in the history.
pub struct MoveCountInvariant;

impl Invariant<Snapshot<'_>> for MoveCountInvariant {
    fn holds(game: &Snapshot<'_>) -> bool {
        game.board.filled() == game.history.len()
            && game
                .history
                .iter()
                .all(|m| game.board.get(m.position) == Some(Square::Occupied(m.mark)))
    }

    fn description() -> &'static str {
        "Filled squares match the move history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Mark, Move};

    #[test]
    fn test_matching_history_holds() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        let history = [Move::new(Mark::X, 4)];
        assert!(MoveCountInvariant::holds(&Snapshot::new(&board, &history)));
    }

    #[test]
    fn test_extra_square_violates() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        board.place(0, Mark::O).unwrap();
        let history = [Move::new(Mark::X, 4)];
        assert!(!MoveCountInvariant::holds(&Snapshot::new(&board, &history)));
    }
}
