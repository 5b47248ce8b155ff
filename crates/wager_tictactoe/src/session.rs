//! Staked game session against an automated opponent.
//!
//! A [`Session`] moves through three phases:
//!
//! ```text
//! Idle --start--> Playing --decided--> Finished
//!   ^                                      |
//!   +---------------- reset ---------------+
//! ```
//!
//! The human always plays [`Mark::X`] and moves first; the opponent plays
//! [`Mark::O`]. Rejected requests never change the session.

use super::contracts::{Contract, MoveContract};
use super::invariants::Snapshot;
use super::search::{Minimax, Opponent};
use super::settlement::{PayoutRules, Settlement};
use super::{Board, Mark, Move, Outcome, Phase, SessionError};
use tracing::{debug, error, info, instrument, warn};

/// Mark played by the human.
pub const HUMAN: Mark = Mark::X;
/// Mark played by the automated opponent.
pub const AUTOMATED: Mark = Mark::O;

/// One staked game: board, turn, phase, stake and opponent.
#[derive(Debug, Clone)]
pub struct Session<O: Opponent = Minimax> {
    board: Board,
    current_turn: Mark,
    phase: Phase,
    stake: f64,
    thinking: bool,
    history: Vec<Move>,
    settlement: Option<Settlement>,
    rules: PayoutRules,
    opponent: O,
}

impl Session<Minimax> {
    /// Creates an idle session against the minimax opponent with default rules.
    #[instrument]
    pub fn new() -> Self {
        Self::with_opponent(Minimax, PayoutRules::default())
    }
}

impl Default for Session<Minimax> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Opponent> Session<O> {
    /// Creates an idle session with a custom opponent and payout rules.
    #[instrument(skip(opponent), fields(opponent = opponent.name()))]
    pub fn with_opponent(opponent: O, rules: PayoutRules) -> Self {
        info!("Creating new game session");
        Self {
            board: Board::new(),
            current_turn: HUMAN,
            phase: Phase::Idle,
            stake: 0.0,
            thinking: false,
            history: Vec::new(),
            settlement: None,
            rules,
            opponent,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Sets the stake for the next game, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// [`SessionError::StakeLocked`] outside the idle phase and
    /// [`SessionError::InvalidStake`] for amounts the rules reject.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn configure_stake(&mut self, amount: f64) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            warn!("Stake change rejected outside idle phase");
            return Err(SessionError::StakeLocked(self.phase));
        }
        self.stake = self.rules.limits.validate(amount)?;
        info!(stake = self.stake, "Stake configured");
        Ok(())
    }

    /// Starts a game on an empty board with the human to move.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyStarted`] outside the idle phase and
    /// [`SessionError::StakeRequired`] when no stake is set.
    #[instrument(skip(self), fields(phase = %self.phase, stake = self.stake))]
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            warn!("Start rejected outside idle phase");
            return Err(SessionError::AlreadyStarted(self.phase));
        }
        if self.stake <= 0.0 {
            warn!("Start rejected without stake");
            return Err(SessionError::StakeRequired);
        }
        self.board = Board::new();
        self.history.clear();
        self.settlement = None;
        self.current_turn = HUMAN;
        self.thinking = false;
        self.phase = Phase::Playing;
        info!("Game started");
        Ok(())
    }

    /// Plays the human move and, if the game continues, the opponent's reply.
    ///
    /// Returns the outcome after both moves.
    ///
    /// # Errors
    ///
    /// See [`Session::submit_move_deferred`] and
    /// [`Session::complete_opponent_turn`].
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, position: usize) -> Result<Outcome, SessionError> {
        let outcome = self.submit_move_deferred(position)?;
        if self.thinking {
            self.complete_opponent_turn()
        } else {
            Ok(outcome)
        }
    }

    /// Plays the human move only.
    ///
    /// If the game continues the turn passes to the opponent and
    /// [`Session::is_thinking`] stays set until
    /// [`Session::complete_opponent_turn`] runs.
    ///
    /// # Errors
    ///
    /// - [`SessionError::OpponentBusy`] while a reply is pending.
    /// - [`SessionError::NotYourTurn`] outside the playing phase.
    /// - [`SessionError::IllegalMove`] for an occupied or out-of-range square.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit_move_deferred(&mut self, position: usize) -> Result<Outcome, SessionError> {
        if self.thinking {
            warn!(position, "Move rejected while opponent is thinking");
            return Err(SessionError::OpponentBusy);
        }
        if self.phase != Phase::Playing || self.current_turn != HUMAN {
            warn!(position, turn = %self.current_turn, "Move rejected out of turn");
            return Err(SessionError::NotYourTurn);
        }

        let outcome = self.apply(Move::new(HUMAN, position)).inspect_err(|e| {
            warn!(position, error = %e, "Invalid move");
        })?;

        if outcome.is_terminal() {
            self.finish(outcome);
        } else {
            self.current_turn = AUTOMATED;
            self.thinking = true;
            debug!("Opponent to move");
        }
        Ok(outcome)
    }

    /// Runs the opponent's pending reply.
    ///
    /// # Errors
    ///
    /// [`SessionError::NothingPending`] if no reply is pending.
    /// [`SessionError::InvalidState`] (or [`SessionError::IllegalMove`] from
    /// a misbehaving opponent) indicates a bug; the session is unchanged.
    #[instrument(skip(self), fields(opponent = self.opponent.name()))]
    pub fn complete_opponent_turn(&mut self) -> Result<Outcome, SessionError> {
        if !self.thinking {
            return Err(SessionError::NothingPending);
        }

        let position = self
            .opponent
            .choose(&self.board, AUTOMATED)
            .inspect_err(|e| error!(error = %e, "Opponent invoked on a decided board"))?;
        let outcome = self
            .apply(Move::new(AUTOMATED, position))
            .inspect_err(|e| error!(position, error = %e, "Opponent chose an illegal move"))?;
        debug!(position, "Opponent moved");

        self.thinking = false;
        if outcome.is_terminal() {
            self.finish(outcome);
        } else {
            self.current_turn = HUMAN;
        }
        Ok(outcome)
    }

    /// Returns to idle with an empty board and no stake.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.settlement = None;
        self.current_turn = HUMAN;
        self.thinking = false;
        self.stake = 0.0;
        self.phase = Phase::Idle;
        info!("Session reset");
    }

    /// Validates and applies a move, committing only if every contract holds.
    fn apply(&mut self, action: Move) -> Result<Outcome, SessionError> {
        let before = Snapshot::new(&self.board, &self.history);
        MoveContract::pre(&before, &action)?;

        let mut board = self.board;
        board.place(action.position, action.mark)?;
        let mut history = self.history.clone();
        history.push(action);

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &Snapshot::new(&board, &history))?;

        self.board = board;
        self.history = history;
        debug!(%action, "Move applied");
        Ok(self.board.winner())
    }

    fn finish(&mut self, outcome: Outcome) {
        let settlement = self.rules.settle(outcome, self.stake);
        self.phase = Phase::Finished;
        self.settlement = Some(settlement);
        info!(%outcome, stake = self.stake, payout = settlement.payout, "Game finished");
    }

    // ─────────────────────────────────────────────────────────────
    //  Observers
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark expected to move next.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Outcome derived from the board.
    pub fn outcome(&self) -> Outcome {
        self.board.winner()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured stake (0 when unset).
    pub fn stake(&self) -> f64 {
        self.stake
    }

    /// Whether the opponent's reply is pending.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Moves played this game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Payout for the current outcome; 0 until the game is finished.
    pub fn payout(&self) -> f64 {
        self.settlement.map_or(0.0, |s| s.payout)
    }

    /// Settlement record, present once finished.
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Stake and payout rules in force.
    pub fn rules(&self) -> &PayoutRules {
        &self.rules
    }

    /// The automated opponent.
    pub fn opponent(&self) -> &O {
        &self.opponent
    }
}
