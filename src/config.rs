//! Table configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::Path;
use tracing::{debug, info, instrument};
use wager_tictactoe::settlement::{
    DEFAULT_MAX_STAKE, DEFAULT_MIN_STAKE, DEFAULT_STAKE_PRESETS, DEFAULT_WIN_MULTIPLIER,
};
use wager_tictactoe::{FirstOpen, Minimax, Opponent, PayoutRules, StakeLimits};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WAGER_CONFIG";

/// Which automated opponent sits at the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OpponentKind {
    /// Full-depth minimax (never loses).
    #[default]
    Minimax,
    /// Takes the first empty square.
    FirstOpen,
}

impl OpponentKind {
    /// Builds the opponent.
    pub fn build(self) -> Box<dyn Opponent> {
        match self {
            OpponentKind::Minimax => Box::new(Minimax),
            OpponentKind::FirstOpen => Box::new(FirstOpen),
        }
    }
}

/// Settings for a table: player, wallet, stakes and opponent.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Name shown for the human player.
    player_name: String,

    /// Opening balance of the simulated wallet.
    starting_balance: f64,

    /// Smallest accepted stake.
    min_stake: f64,

    /// Largest accepted stake.
    max_stake: f64,

    /// Stake multiplier paid on a human win.
    win_multiplier: f64,

    /// Quick-pick stake amounts.
    stake_presets: Vec<f64>,

    /// Automated opponent.
    opponent: OpponentKind,

    /// Pause before the opponent's reply is shown, in milliseconds.
    think_delay_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            player_name: "player".to_string(),
            starting_balance: 1.0,
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: DEFAULT_MAX_STAKE,
            win_multiplier: DEFAULT_WIN_MULTIPLIER,
            stake_presets: DEFAULT_STAKE_PRESETS.to_vec(),
            opponent: OpponentKind::default(),
            think_delay_ms: 1000,
        }
    }
}

impl TableConfig {
    /// Loads configuration from a TOML file; missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.payout_rules()?;
        info!(player = %config.player_name, opponent = %config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config source: an explicit path, then `WAGER_CONFIG`,
    /// then built-in defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        Self::from_env_value(std::env::var(CONFIG_ENV))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, ConfigError> {
        match value {
            Ok(path) => Self::from_file(path),
            Err(VarError::NotPresent) => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
            Err(e @ VarError::NotUnicode(_)) => Err(ConfigError::new(format!(
                "{} is not a usable path: {}",
                CONFIG_ENV, e
            ))),
        }
    }

    /// Overrides the opponent.
    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }

    /// Overrides the reply delay.
    pub fn with_think_delay_ms(mut self, think_delay_ms: u64) -> Self {
        self.think_delay_ms = think_delay_ms;
        self
    }

    /// Validated stake and payout rules.
    #[instrument(skip(self))]
    pub fn payout_rules(&self) -> Result<PayoutRules, ConfigError> {
        let finite = [self.min_stake, self.max_stake, self.win_multiplier]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.min_stake <= 0.0 {
            return Err(ConfigError::new(format!(
                "min_stake must be a positive number, got {}",
                self.min_stake
            )));
        }
        if self.min_stake > self.max_stake {
            return Err(ConfigError::new(format!(
                "min_stake {} exceeds max_stake {}",
                self.min_stake, self.max_stake
            )));
        }
        if self.win_multiplier < 1.0 {
            return Err(ConfigError::new(format!(
                "win_multiplier must be at least 1, got {}",
                self.win_multiplier
            )));
        }
        Ok(PayoutRules {
            limits: StakeLimits {
                min: self.min_stake,
                max: self.max_stake,
            },
            win_multiplier: self.win_multiplier,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
