//! A session wired to a wallet and a stats ledger.
//!
//! The table is the orchestration layer around the pure
//! [`Session`]: it checks the stake against the wallet balance, and on
//! each transition into [`Phase::Finished`] it moves the net result through
//! the wallet and records the result, exactly once per game. Stakes are not
//! taken at start, so a win credits `payout - stake` and a loss debits the
//! stake.

use crate::stats::StatsLedger;
use crate::wallet::{TransactionReceipt, Wallet, WalletError};
use derive_more::{Display, Error};
use tracing::{info, instrument, warn};
use wager_tictactoe::{Minimax, Opponent, Outcome, Phase, Session, SessionError};

/// Error raised by table operations.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum TableError {
    /// The session rejected the request.
    #[display("{}", _0)]
    Session(SessionError),

    /// The wallet rejected the request.
    #[display("{}", _0)]
    Wallet(WalletError),

    /// A wallet must be connected to stake.
    #[display("Connect a wallet before staking")]
    NotConnected,

    /// The stake exceeds the wallet balance.
    #[display("Insufficient balance: stake {}, balance {}", stake, balance)]
    InsufficientBalance {
        /// Requested stake.
        stake: f64,
        /// Wallet balance.
        balance: f64,
    },
}

impl From<SessionError> for TableError {
    fn from(err: SessionError) -> Self {
        TableError::Session(err)
    }
}

impl From<WalletError> for TableError {
    fn from(err: WalletError) -> Self {
        TableError::Wallet(err)
    }
}

/// Session, wallet and ledger for one seated player.
#[derive(Debug)]
pub struct Table<W: Wallet, O: Opponent = Minimax> {
    session: Session<O>,
    wallet: W,
    ledger: StatsLedger,
    presets: Vec<f64>,
    settled: bool,
    last_receipt: Option<TransactionReceipt>,
}

impl<W: Wallet, O: Opponent> Table<W, O> {
    /// Seats a wallet at a session. Presets outside the stake limits are dropped.
    #[instrument(skip_all)]
    pub fn new(session: Session<O>, wallet: W, presets: &[f64]) -> Self {
        let presets = session.rules().limits.filter_presets(presets);
        Self {
            session,
            wallet,
            ledger: StatsLedger::new(),
            presets,
            settled: false,
            last_receipt: None,
        }
    }

    /// Connects the wallet and returns its address.
    #[instrument(skip(self))]
    pub fn connect(&mut self) -> Result<String, TableError> {
        Ok(self.wallet.connect()?)
    }

    /// Disconnects the wallet.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self) {
        self.wallet.disconnect();
    }

    /// Sets the stake after checking the wallet can cover it.
    #[instrument(skip(self))]
    pub fn stake(&mut self, amount: f64) -> Result<(), TableError> {
        if self.wallet.address().is_none() {
            warn!("Stake attempted without a connected wallet");
            return Err(TableError::NotConnected);
        }
        let balance = self.wallet.balance()?;
        if amount > balance {
            warn!(balance, "Stake exceeds balance");
            return Err(TableError::InsufficientBalance {
                stake: amount,
                balance,
            });
        }
        Ok(self.session.configure_stake(amount)?)
    }

    /// Starts the game.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), TableError> {
        self.session.start()?;
        self.settled = false;
        self.last_receipt = None;
        Ok(())
    }

    /// Plays the human move and the opponent's reply.
    #[instrument(skip(self))]
    pub fn play(&mut self, position: usize) -> Result<Outcome, TableError> {
        let outcome = self.session.submit_move(position)?;
        self.settle()?;
        Ok(outcome)
    }

    /// Plays the human move only; call [`Table::complete_reply`] afterwards.
    #[instrument(skip(self))]
    pub fn play_deferred(&mut self, position: usize) -> Result<Outcome, TableError> {
        let outcome = self.session.submit_move_deferred(position)?;
        self.settle()?;
        Ok(outcome)
    }

    /// Runs the opponent's pending reply.
    #[instrument(skip(self))]
    pub fn complete_reply(&mut self) -> Result<Outcome, TableError> {
        let outcome = self.session.complete_opponent_turn()?;
        self.settle()?;
        Ok(outcome)
    }

    /// Clears the board and stake for another game.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) {
        self.session.reset();
        self.settled = false;
        self.last_receipt = None;
    }

    /// Pays and records a finished game once; a failed transfer can be
    /// retried by calling again.
    #[instrument(skip(self))]
    pub fn settle(&mut self) -> Result<(), TableError> {
        if self.settled || self.session.phase() != Phase::Finished {
            return Ok(());
        }
        let Some(settlement) = self.session.settlement().copied() else {
            return Ok(());
        };
        let address = self
            .wallet
            .address()
            .map(str::to_string)
            .ok_or(TableError::NotConnected)?;

        // The stake never left the wallet, so only the net change moves.
        let net = settlement.net();
        if net != 0.0 {
            let memo = format!("tic-tac-toe: {}", settlement.outcome);
            self.last_receipt = Some(self.wallet.send_transaction(net, &memo)?);
        }
        self.ledger
            .record(&address, settlement.outcome, settlement.payout);
        self.settled = true;
        info!(%address, payout = settlement.payout, net, "Game settled");
        Ok(())
    }

    /// The session.
    pub fn session(&self) -> &Session<O> {
        &self.session
    }

    /// The wallet.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Accumulated results.
    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Stake presets allowed by the limits.
    pub fn presets(&self) -> &[f64] {
        &self.presets
    }

    /// Receipt of the last settlement transfer (none for a tie).
    pub fn last_receipt(&self) -> Option<&TransactionReceipt> {
        self.last_receipt.as_ref()
    }
}
