//! Per-player results accumulated across finished games.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use wager_tictactoe::{HUMAN, Outcome};

/// Running totals for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Finished games.
    pub games_played: u32,
    /// Games the player won.
    pub wins: u32,
    /// Games the opponent won.
    pub losses: u32,
    /// Tied games.
    pub ties: u32,
    /// Sum of win and loss payouts.
    pub total_earnings: f64,
    /// Wins as a rounded percentage of games played.
    pub win_rate: u32,
}

impl PlayerStats {
    fn record(&mut self, outcome: Outcome, payout: f64) {
        match outcome {
            Outcome::Undecided => return,
            Outcome::Winner(mark) if mark == HUMAN => {
                self.wins += 1;
                self.total_earnings += payout;
            }
            Outcome::Winner(_) => {
                self.losses += 1;
                self.total_earnings += payout;
            }
            Outcome::Tie => self.ties += 1,
        }
        self.games_played += 1;
        self.win_rate = (f64::from(self.wins) / f64::from(self.games_played) * 100.0).round() as u32;
    }
}

/// Results keyed by player identity (wallet address).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsLedger {
    players: HashMap<String, PlayerStats>,
}

impl StatsLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished game. Undecided outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, player: &str, outcome: Outcome, payout: f64) {
        if !outcome.is_terminal() {
            warn!("Ignoring undecided game");
            return;
        }
        let stats = self.players.entry(player.to_string()).or_default();
        stats.record(outcome, payout);
        debug!(games = stats.games_played, win_rate = stats.win_rate, "Stats updated");
    }

    /// Totals for `player`; zeroes if never seen.
    pub fn get(&self, player: &str) -> PlayerStats {
        self.players.get(player).cloned().unwrap_or_default()
    }

    /// Known players, sorted.
    pub fn players(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.players.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
