//! Line-oriented terminal front end for a [`Table`].

use crate::table::Table;
use crate::wallet::Wallet;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, instrument};
use wager_tictactoe::{HUMAN, Opponent, Outcome, Phase, Position};

const HELP: &str = "\
Commands:
  stake <amount>   set the stake (see `presets`)
  presets          list quick stake amounts
  start            start a game
  1-9 | <label>    play a square (e.g. `5` or `center`)
  board            show the board
  balance          show the wallet balance
  stats            show your results
  new              clear the table for another game
  quit             leave";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show help.
    Help,
    /// Leave.
    Quit,
    /// Set the stake.
    Stake(f64),
    /// List stake presets.
    Presets,
    /// Start a game.
    Start,
    /// Play a square (board index 0-8).
    Play(usize),
    /// Show the board.
    Board,
    /// Show the wallet balance.
    Balance,
    /// Show player statistics.
    Stats,
    /// Reset for another game.
    NewRound,
}

impl Command {
    /// Parses one input line. Squares are numbered 1-9 as on screen.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("").to_lowercase();
        match head.as_str() {
            "help" | "?" | "" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "presets" => Ok(Command::Presets),
            "start" => Ok(Command::Start),
            "board" => Ok(Command::Board),
            "balance" => Ok(Command::Balance),
            "stats" => Ok(Command::Stats),
            "new" | "reset" => Ok(Command::NewRound),
            "stake" => words
                .next()
                .and_then(|w| w.parse::<f64>().ok())
                .map(Command::Stake)
                .ok_or_else(|| "usage: stake <amount>".to_string()),
            _ => {
                if let Ok(n) = head.parse::<usize>() {
                    return match n {
                        1..=9 => Ok(Command::Play(n - 1)),
                        _ => Err(format!("square {n} is not on the board (1-9)")),
                    };
                }
                Position::from_label_or_number(line)
                    .map(|p| Command::Play(p.to_index()))
                    .ok_or_else(|| format!("unknown command `{line}` (try `help`)"))
            }
        }
    }
}

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip_all, fields(think_delay_ms = think_delay.as_millis() as u64))]
pub fn run<Wl, O, R, W>(
    table: &mut Table<Wl, O>,
    input: R,
    output: &mut W,
    think_delay: Duration,
) -> Result<()>
where
    Wl: Wallet,
    O: Opponent,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "Tic-tac-toe against {}. You are {}. Type `help` for commands.",
        table.session().opponent().name(),
        HUMAN
    )?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        debug!(?command, "Console command");

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Presets => {
                let presets: Vec<String> = table.presets().iter().map(|p| p.to_string()).collect();
                writeln!(output, "Presets: {}", presets.join(", "))?;
            }
            Command::Stake(amount) => match table.stake(amount) {
                Ok(()) => writeln!(output, "Stake set to {amount}")?,
                Err(e) => writeln!(output, "{e}")?,
            },
            Command::Start => match table.start() {
                Ok(()) => writeln!(output, "{}", table.session().board().display())?,
                Err(e) => writeln!(output, "{e}")?,
            },
            Command::Play(position) => play(table, position, output, think_delay)?,
            Command::Board => writeln!(output, "{}", table.session().board().display())?,
            Command::Balance => match table.wallet().balance() {
                Ok(balance) => writeln!(output, "Balance: {balance}")?,
                Err(e) => writeln!(output, "{e}")?,
            },
            Command::Stats => {
                let stats = match table.wallet().address() {
                    Some(address) => table.ledger().get(address),
                    None => Default::default(),
                };
                writeln!(
                    output,
                    "Games {} | W {} L {} T {} | win rate {}% | earnings {}",
                    stats.games_played,
                    stats.wins,
                    stats.losses,
                    stats.ties,
                    stats.win_rate,
                    stats.total_earnings
                )?;
            }
            Command::NewRound => {
                table.new_round();
                writeln!(output, "Table cleared. Set a stake to play again.")?;
            }
        }
    }
    Ok(())
}

fn play<Wl, O, W>(
    table: &mut Table<Wl, O>,
    position: usize,
    output: &mut W,
    think_delay: Duration,
) -> Result<()>
where
    Wl: Wallet,
    O: Opponent,
    W: Write,
{
    if let Err(e) = table.play_deferred(position) {
        writeln!(output, "{e}")?;
        return Ok(());
    }

    if table.session().is_thinking() {
        writeln!(output, "{}", table.session().board().display())?;
        writeln!(output, "Opponent is thinking...")?;
        output.flush()?;
        std::thread::sleep(think_delay);
        if let Err(e) = table.complete_reply() {
            writeln!(output, "{e}")?;
            return Ok(());
        }
    }

    writeln!(output, "{}", table.session().board().display())?;
    if table.session().phase() == Phase::Finished {
        let verdict = match table.session().outcome() {
            Outcome::Winner(mark) if mark == HUMAN => "You win!",
            Outcome::Winner(_) => "You lose.",
            Outcome::Tie | Outcome::Undecided => "It's a tie.",
        };
        writeln!(
            output,
            "{verdict} Payout: {}. Type `new` to play again.",
            table.session().payout()
        )?;
        if let Some(receipt) = table.last_receipt() {
            writeln!(output, "Transaction {} settled", receipt.id)?;
        }
    }
    Ok(())
}
