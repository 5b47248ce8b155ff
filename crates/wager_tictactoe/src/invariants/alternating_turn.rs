//! Alternating turn invariant: X, O, X, O, ...

use super::{Invariant, Snapshot};
use crate::Mark;

/// Invariant: marks alternate starting with X, so X leads O by at most one.
pub struct AlternatingTurnInvariant;

impl Invariant<Snapshot<'_>> for AlternatingTurnInvariant {
    fn holds(game: &Snapshot<'_>) -> bool {
        let alternates = game.history.iter().enumerate().all(|(i, m)| {
            let expected = if i % 2 == 0 { Mark::X } else { Mark::O };
            m.mark == expected
        });
        let xs = game.board.count(Mark::X);
        let os = game.board.count(Mark::O);
        alternates && (xs == os || xs == os + 1)
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
