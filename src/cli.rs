//! Command-line interface for wager_games.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wager_games::OpponentKind;

/// Wager Games - staked tic-tac-toe against a perfect opponent
#[derive(Parser, Debug)]
#[command(name = "wager_games")]
#[command(about = "Staked tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML table config (falls back to $WAGER_CONFIG, then defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin/stdout
    Play {
        /// Opponent override
        #[arg(long, value_enum)]
        opponent: Option<OpponentKind>,

        /// Pause before the opponent's reply, in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,
    },

    /// Pit two opponents against each other
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Opponent playing X (moves first)
        #[arg(short, long, value_enum, default_value = "minimax")]
        x: OpponentKind,

        /// Opponent playing O
        #[arg(short, long, value_enum, default_value = "minimax")]
        o: OpponentKind,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the payout for an outcome and stake under the configured rules
    Payout {
        /// Outcome from the human's side
        #[arg(long, value_enum)]
        outcome: Verdict,

        /// Stake amount
        #[arg(long)]
        stake: f64,
    },
}

/// Outcome as seen by the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verdict {
    /// Human wins
    Win,
    /// Automated player wins
    Loss,
    /// Tie
    Tie,
}
