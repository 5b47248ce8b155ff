//! Settlement collaborator: the wallet capability the table pays through.
//!
//! The core never calls a wallet. The [`Table`](crate::Table) hands it the
//! settlement amount once a game is finished.

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info, instrument, warn};

/// Error raised by a wallet.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum WalletError {
    /// No account is connected.
    #[display("Wallet is not connected")]
    NotConnected,

    /// A debit exceeds the available balance.
    #[display("Insufficient funds: needed {}, available {}", needed, available)]
    InsufficientFunds {
        /// Amount requested.
        needed: f64,
        /// Balance on hand.
        available: f64,
    },

    /// Amount is NaN or infinite.
    #[display("Invalid transaction amount {}", _0)]
    InvalidAmount(#[error(not(source))] f64),
}

/// Proof of a completed transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction identifier.
    pub id: String,
    /// Signed amount credited (negative for a debit).
    pub amount: f64,
    /// Free-form description.
    pub memo: String,
    /// Balance after the transfer.
    pub balance_after: f64,
    /// When the transfer was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Account capability consumed by the table.
pub trait Wallet: std::fmt::Debug {
    /// Connects and returns the account address.
    fn connect(&mut self) -> Result<String, WalletError>;

    /// Disconnects the account.
    fn disconnect(&mut self);

    /// Connected address, if any.
    fn address(&self) -> Option<&str>;

    /// Current balance.
    fn balance(&self) -> Result<f64, WalletError>;

    /// Signs a message with the connected account.
    fn sign_message(&self, message: &str) -> Result<String, WalletError>;

    /// Credits (positive) or debits (negative) the account.
    fn send_transaction(
        &mut self,
        amount: f64,
        memo: &str,
    ) -> Result<TransactionReceipt, WalletError>;
}

/// In-memory wallet for local play. Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedWallet {
    address: String,
    balance: f64,
    connected: bool,
    receipts: Vec<TransactionReceipt>,
}

impl SimulatedWallet {
    /// Creates a disconnected wallet holding `balance`.
    #[instrument(skip(address), fields(address = %address.as_ref()))]
    pub fn new(address: impl AsRef<str>, balance: f64) -> Self {
        Self {
            address: address.as_ref().to_string(),
            balance,
            connected: false,
            receipts: Vec::new(),
        }
    }

    /// Transfers recorded so far.
    pub fn receipts(&self) -> &[TransactionReceipt] {
        &self.receipts
    }

    fn fingerprint(&self, data: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.address.hash(&mut hasher);
        data.hash(&mut hasher);
        hasher.finish()
    }
}

impl Wallet for SimulatedWallet {
    #[instrument(skip(self), fields(address = %self.address))]
    fn connect(&mut self) -> Result<String, WalletError> {
        self.connected = true;
        info!("Wallet connected");
        Ok(self.address.clone())
    }

    #[instrument(skip(self), fields(address = %self.address))]
    fn disconnect(&mut self) {
        self.connected = false;
        info!("Wallet disconnected");
    }

    fn address(&self) -> Option<&str> {
        self.connected.then_some(self.address.as_str())
    }

    fn balance(&self) -> Result<f64, WalletError> {
        if !self.connected {
            return Err(WalletError::NotConnected);
        }
        Ok(self.balance)
    }

    /// Deterministic stand-in signature; not cryptographic.
    fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        if !self.connected {
            return Err(WalletError::NotConnected);
        }
        Ok(format!("0x{:016x}", self.fingerprint(message)))
    }

    #[instrument(skip(self), fields(address = %self.address, balance = self.balance))]
    fn send_transaction(
        &mut self,
        amount: f64,
        memo: &str,
    ) -> Result<TransactionReceipt, WalletError> {
        if !self.connected {
            warn!("Transaction attempted while disconnected");
            return Err(WalletError::NotConnected);
        }
        if !amount.is_finite() {
            return Err(WalletError::InvalidAmount(amount));
        }
        if self.balance + amount < 0.0 {
            warn!(amount, "Transaction exceeds balance");
            return Err(WalletError::InsufficientFunds {
                needed: -amount,
                available: self.balance,
            });
        }

        self.balance += amount;
        let sequence = self.receipts.len();
        let receipt = TransactionReceipt {
            id: format!("0x{:016x}", self.fingerprint(&format!("{sequence}:{memo}"))),
            amount,
            memo: memo.to_string(),
            balance_after: self.balance,
            timestamp: Utc::now(),
        };
        debug!(id = %receipt.id, balance = self.balance, "Transaction recorded");
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }
}
