//! Wager Games - staked tic-tac-toe against an automated opponent
//!
//! The game core lives in [`wager_tictactoe`]. This crate adds the pieces
//! around it that a playable table needs.
//!
//! # Architecture
//!
//! - **Config**: TOML table settings ([`TableConfig`])
//! - **Wallet**: balance and transfers behind the [`Wallet`] trait
//! - **Stats**: per-player results ([`StatsLedger`])
//! - **Table**: a session wired to a wallet and the ledger ([`Table`])
//! - **Console**: line-oriented terminal front end
//! - **Arena**: opponent-versus-opponent series
//!
//! # Example
//!
//! ```
//! use wager_games::{SimulatedWallet, Table};
//! use wager_tictactoe::{Session, settlement::DEFAULT_STAKE_PRESETS};
//!
//! let wallet = SimulatedWallet::new("alice", 1.0);
//! let mut table = Table::new(Session::new(), wallet, &DEFAULT_STAKE_PRESETS);
//! table.connect()?;
//! table.stake(0.1)?;
//! table.start()?;
//! table.play(0)?;
//! # Ok::<(), wager_games::TableError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod arena;
mod config;
pub mod console;
mod stats;
mod table;
mod wallet;

pub use arena::{Tally, self_play};
pub use config::{CONFIG_ENV, ConfigError, OpponentKind, TableConfig};
pub use stats::{PlayerStats, StatsLedger};
pub use table::{Table, TableError};
pub use wallet::{SimulatedWallet, TransactionReceipt, Wallet, WalletError};
