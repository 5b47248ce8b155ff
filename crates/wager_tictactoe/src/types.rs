//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    /// The human seat (always moves first).
    X,
    /// The automated seat.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// The board is a plain value: copies are independent, so search code can
/// mutate a copy freely without touching the session's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Places a mark on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] for an index past 8 and
    /// [`MoveError::Occupied`] if the square already holds a mark.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, pos: usize, mark: Mark) -> Result<(), MoveError> {
        match self.squares.get_mut(pos) {
            None => Err(MoveError::OutOfRange(pos)),
            Some(Square::Occupied(_)) => Err(MoveError::Occupied(pos)),
            Some(square) => {
                *square = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Overwrites a square without checks (search hot path).
    pub(crate) fn set_unchecked(&mut self, pos: usize, mark: Mark) {
        self.squares[pos] = Square::Occupied(mark);
    }

    /// Empties a square. Out-of-range indices are ignored.
    pub fn clear(&mut self, pos: usize) {
        if let Some(square) = self.squares.get_mut(pos) {
            *square = Square::Empty;
        }
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Counts the squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Counts the non-empty squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Indices of empty squares in ascending order.
    pub fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Checks if no empty square remains.
    pub fn is_full(&self) -> bool {
        super::rules::is_full(self)
    }

    /// Returns the line winner, the tie, or [`Outcome::Undecided`](super::Outcome::Undecided).
    pub fn winner(&self) -> super::Outcome {
        super::rules::outcome(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_square() {
        let mut board = Board::new();
        assert!(board.place(4, Mark::X).is_ok());
        assert_eq!(board.get(4), Some(Square::Occupied(Mark::X)));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.place(0, Mark::X).unwrap();
        assert_eq!(board.place(0, Mark::O), Err(MoveError::Occupied(0)));
        assert_eq!(board.place(9, Mark::O), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.get(0), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_empty_positions_ascending_and_restartable() {
        let mut board = Board::new();
        board.place(1, Mark::X).unwrap();
        board.place(7, Mark::O).unwrap();
        let first: Vec<_> = board.empty_positions().collect();
        let second: Vec<_> = board.empty_positions().collect();
        assert_eq!(first, vec![0, 2, 3, 4, 5, 6, 8]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_restores_square() {
        let mut board = Board::new();
        board.place(3, Mark::O).unwrap();
        board.clear(3);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let mut board = Board::new();
        board.place(0, Mark::X).unwrap();
        board.place(4, Mark::O).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
