//! Wager Games - terminal entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Verdict};
use std::io;
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wager_games::{OpponentKind, SimulatedWallet, Table, TableConfig, console, self_play};
use wager_tictactoe::{AUTOMATED, HUMAN, Outcome, Session};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TableConfig::load(cli.config.as_deref())
        .context("Failed to load table configuration")?;

    match cli.command.unwrap_or(Command::Play {
        opponent: None,
        think_delay_ms: None,
    }) {
        Command::Play {
            opponent,
            think_delay_ms,
        } => {
            let mut config = config;
            if let Some(opponent) = opponent {
                config = config.with_opponent(opponent);
            }
            if let Some(ms) = think_delay_ms {
                config = config.with_think_delay_ms(ms);
            }
            run_play(config)
        }
        Command::Simulate { games, x, o, json } => run_simulate(games, x, o, json),
        Command::Payout { outcome, stake } => run_payout(&config, outcome, stake),
    }
}

/// Run an interactive table on stdin/stdout
#[instrument(skip(config), fields(opponent = %config.opponent()))]
fn run_play(config: TableConfig) -> Result<()> {
    let rules = config.payout_rules()?;
    let session = Session::with_opponent(config.opponent().build(), rules);
    let wallet = SimulatedWallet::new(config.player_name(), *config.starting_balance());
    let mut table = Table::new(session, wallet, config.stake_presets());
    let address = table.connect()?;
    info!(%address, "Player seated");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console::run(
        &mut table,
        stdin.lock(),
        &mut stdout,
        Duration::from_millis(*config.think_delay_ms()),
    )
}

/// Run an opponent-versus-opponent series and print the tally
#[instrument]
fn run_simulate(games: u32, x: OpponentKind, o: OpponentKind, json: bool) -> Result<()> {
    let mut x_player = x.build();
    let mut o_player = o.build();
    let tally = self_play(x_player.as_mut(), o_player.as_mut(), games)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
        return Ok(());
    }
    println!(
        "{x} (X) vs {o} (O) over {games} games: X {} | O {} | ties {}",
        tally.x_wins, tally.o_wins, tally.ties
    );
    Ok(())
}

/// Print the payout for an outcome under the configured rules
#[instrument(skip(config))]
fn run_payout(config: &TableConfig, verdict: Verdict, stake: f64) -> Result<()> {
    let rules = config.payout_rules()?;
    let stake = rules.limits.validate(stake)?;
    let outcome = match verdict {
        Verdict::Win => Outcome::Winner(HUMAN),
        Verdict::Loss => Outcome::Winner(AUTOMATED),
        Verdict::Tie => Outcome::Tie,
    };
    let settlement = rules.settle(outcome, stake);
    println!(
        "{outcome}: stake {stake}, payout {}, returned {}",
        settlement.payout,
        settlement.total_returned()
    );
    Ok(())
}
