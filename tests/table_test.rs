//! Table orchestration: stake checks, settlement through the wallet, stats.

use wager_games::{SimulatedWallet, Table, TableError, Wallet, WalletError};
use wager_tictactoe::settlement::DEFAULT_STAKE_PRESETS;
use wager_tictactoe::{
    FirstOpen, Minimax, Opponent, Outcome, PayoutRules, Phase, Session, SessionError, StakeLimits,
};

fn table_with<O: Opponent>(opponent: O, balance: f64) -> Table<SimulatedWallet, O> {
    let session = Session::with_opponent(opponent, PayoutRules::default());
    let mut table = Table::new(
        session,
        SimulatedWallet::new("0xplayer", balance),
        &DEFAULT_STAKE_PRESETS,
    );
    table.connect().unwrap();
    table
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_stake_requires_connected_wallet() {
    let session = Session::new();
    let mut table = Table::new(session, SimulatedWallet::new("0xplayer", 1.0), &[]);
    assert_eq!(table.stake(0.1), Err(TableError::NotConnected));

    table.connect().unwrap();
    table.stake(0.1).unwrap();
    assert_eq!(table.session().stake(), 0.1);
}

#[test]
fn test_stake_checked_against_balance() {
    let mut table = table_with(Minimax, 0.1);
    assert_eq!(
        table.stake(0.5),
        Err(TableError::InsufficientBalance {
            stake: 0.5,
            balance: 0.1
        })
    );
    assert_eq!(table.session().stake(), 0.0);
}

#[test]
fn test_stake_limits_still_apply() {
    let mut table = table_with(Minimax, 100.0);
    assert!(matches!(
        table.stake(50.0),
        Err(TableError::Session(SessionError::InvalidStake { .. }))
    ));
}

#[test]
fn test_presets_filtered_by_limits() {
    let rules = PayoutRules {
        limits: StakeLimits { min: 0.01, max: 0.5 },
        win_multiplier: 1.8,
    };
    let table = Table::new(
        Session::with_opponent(Minimax, rules),
        SimulatedWallet::new("0xplayer", 1.0),
        &DEFAULT_STAKE_PRESETS,
    );
    assert_eq!(table.presets(), &[0.01, 0.1, 0.5]);
}

#[test]
fn test_human_win_credits_wallet_once() {
    let mut table = table_with(FirstOpen, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();

    // X 4, O 0, X 2, O 1, X 6 completes the anti-diagonal.
    table.play(4).unwrap();
    table.play(2).unwrap();
    let outcome = table.play(6).unwrap();
    assert_eq!(outcome, Outcome::Winner(wager_tictactoe::HUMAN));
    assert_eq!(table.session().phase(), Phase::Finished);

    // Payout 0.9 includes the 0.5 stake, which never left the wallet.
    let receipt = table.last_receipt().unwrap();
    assert!(approx(receipt.amount, 0.4));
    assert!(approx(table.wallet().balance().unwrap(), 1.4));

    // A second settle is a no-op.
    table.settle().unwrap();
    assert_eq!(table.wallet().receipts().len(), 1);

    let stats = table.ledger().get("0xplayer");
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.win_rate, 100);
    assert!(approx(stats.total_earnings, 0.9));
}

#[test]
fn test_loss_debits_stake() {
    let mut table = table_with(Minimax, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();

    // O answers 4, 2, then completes 2-4-6.
    table.play(0).unwrap();
    table.play(1).unwrap();
    let outcome = table.play(3).unwrap();
    assert_eq!(outcome, Outcome::Winner(wager_tictactoe::AUTOMATED));
    assert!(approx(table.wallet().balance().unwrap(), 0.5));

    let stats = table.ledger().get("0xplayer");
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.win_rate, 0);
    assert!(approx(stats.total_earnings, -0.5));
}

#[test]
fn test_win_then_loss_nets_to_profit_minus_stake() {
    let mut table = table_with(FirstOpen, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();
    for position in [4, 2, 6] {
        table.play(position).unwrap();
    }
    assert!(approx(table.wallet().balance().unwrap(), 1.4));

    // Same stake against the perfect player, which wins on 2-4-6.
    let session = Session::with_opponent(Minimax, PayoutRules::default());
    let wallet = table.wallet().clone();
    let mut table = Table::new(session, wallet, &DEFAULT_STAKE_PRESETS);
    table.connect().unwrap();
    table.stake(0.5).unwrap();
    table.start().unwrap();
    for position in [0, 1, 3] {
        table.play(position).unwrap();
    }
    assert_eq!(
        table.session().outcome(),
        Outcome::Winner(wager_tictactoe::AUTOMATED)
    );

    // 1.0 + 0.8 * 0.5 - 0.5
    assert!(approx(table.wallet().balance().unwrap(), 0.9));
    assert_eq!(table.wallet().receipts().len(), 2);
}

#[test]
fn test_tie_moves_no_money() {
    let mut table = table_with(Minimax, 1.0);
    table.stake(0.1).unwrap();
    table.start().unwrap();
    for position in [0, 8, 7, 2] {
        assert_eq!(table.play(position).unwrap(), Outcome::Undecided);
    }
    assert_eq!(table.play(3).unwrap(), Outcome::Tie);

    assert!(table.last_receipt().is_none());
    assert!(table.wallet().receipts().is_empty());
    assert!(approx(table.wallet().balance().unwrap(), 1.0));
    assert_eq!(table.ledger().get("0xplayer").ties, 1);
}

#[test]
fn test_deferred_reply_settles_on_completion() {
    let mut table = table_with(Minimax, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();
    table.play_deferred(0).unwrap();
    table.complete_reply().unwrap();
    table.play_deferred(1).unwrap();
    table.complete_reply().unwrap();
    table.play_deferred(3).unwrap();
    assert!(table.session().is_thinking());
    assert!(table.wallet().receipts().is_empty());

    table.complete_reply().unwrap();
    assert_eq!(table.session().phase(), Phase::Finished);
    assert_eq!(table.wallet().receipts().len(), 1);
}

#[test]
fn test_new_round_allows_another_game() {
    let mut table = table_with(FirstOpen, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();
    for position in [4, 2, 6] {
        table.play(position).unwrap();
    }
    assert!(matches!(
        table.stake(0.1),
        Err(TableError::Session(SessionError::StakeLocked(Phase::Finished)))
    ));

    table.new_round();
    assert_eq!(table.session().phase(), Phase::Idle);
    assert!(table.last_receipt().is_none());
    table.stake(0.1).unwrap();
    table.start().unwrap();
    for position in [4, 2, 6] {
        table.play(position).unwrap();
    }
    let stats = table.ledger().get("0xplayer");
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.wins, 2);
}

#[test]
fn test_disconnect_blocks_settlement_until_reconnect() {
    let mut table = table_with(FirstOpen, 1.0);
    table.stake(0.5).unwrap();
    table.start().unwrap();
    table.play(4).unwrap();
    table.play(2).unwrap();
    table.disconnect();

    assert_eq!(table.play(6), Err(TableError::NotConnected));
    assert_eq!(table.session().phase(), Phase::Finished);
    assert_eq!(
        table.wallet().balance(),
        Err(WalletError::NotConnected)
    );

    table.connect().unwrap();
    table.settle().unwrap();
    assert_eq!(table.wallet().receipts().len(), 1);
    assert_eq!(table.ledger().get("0xplayer").wins, 1);
}
