//! Integration tests for the vending machine CLI.
//!
//! These run the actual binary, feeding menu scripts over stdin against
//! fixture files copied into a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Copies the fixture data files into a fresh temp dir so save paths can be
/// exercised without touching the checked-in fixtures.
fn fixture_dir() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let stock = dir.path().join("stock.dat");
    let coins = dir.path().join("coins.dat");
    fs::copy("tests/data/stock.dat", &stock).unwrap();
    fs::copy("tests/data/coins.dat", &coins).unwrap();
    (dir, stock, coins)
}

/// Runs the binary over the given files with a scripted stdin, expecting a
/// clean exit, and returns stdout.
fn run_session(stock: &Path, coins: &Path, script: &str) -> String {
    let mut cmd = Command::cargo_bin("vending-engine").unwrap();
    let assert = cmd
        .arg(stock)
        .arg(coins)
        .write_stdin(script)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_missing_arguments_print_usage() {
    let mut cmd = Command::cargo_bin("vending-engine").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: vending-engine"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::cargo_bin("vending-engine").unwrap();
    cmd.arg("no-such-stock.dat")
        .arg("no-such-coins.dat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_malformed_coin_file_is_rejected_with_record_number() {
    let (_dir, stock, coins) = fixture_dir();
    fs::write(&coins, "1000,3\n25,4\n").unwrap();

    let mut cmd = Command::cargo_bin("vending-engine").unwrap();
    cmd.arg(&stock)
        .arg(&coins)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Coin No. 2 failed"));
}

#[test]
fn test_display_items_table() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "1\n9\n");

    assert!(output.contains("Items Menu"));
    assert!(output.contains("I0001|Water"));
    assert!(output.contains("$3.95"));
    assert!(output.contains("Program Terminated"));
}

#[test]
fn test_display_coins_table() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "6\n9\n");

    assert!(output.contains("Coins Summary"));
    assert!(output.contains("5 Cents"));
    assert!(output.contains("10 Dollars"));
}

#[test]
fn test_purchase_with_change_over_stdin() {
    let (_dir, stock, coins) = fixture_dir();
    // Water costs $1.00; pay with a $2 coin.
    let output = run_session(&stock, &coins, "2\nI0001\n200\n9\n");

    assert!(output.contains("You have selected \"Water - Plain still water\""));
    assert!(output.contains("This will cost you $1.00."));
    assert!(output.contains("Here is your Water and change of $1.00: $1"));
}

#[test]
fn test_purchase_rejects_invalid_coin_and_recovers() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "2\nI0001\n7\n100\n9\n");

    assert!(output.contains("is not a valid denomination of money. Please try again."));
    assert!(output.contains("Here is your Water with no change"));
}

#[test]
fn test_save_and_exit_round_trips_files() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "3\n");
    assert!(output.contains("Stock list and coin list has been saved"));

    let stock_text = fs::read_to_string(&stock).unwrap();
    // Catalog is persisted in name order with all fields intact.
    let lines: Vec<&str> = stock_text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "I0003|Apple Pie|A slice of home-made apple pie|3.95|4",
            "I0002|Coffee|Hot and strong coffee|2.50|15",
            "I0001|Water|Plain still water|1.00|20",
        ]
    );

    let coins_text = fs::read_to_string(&coins).unwrap();
    assert!(coins_text.starts_with("5,7\n10,4\n"));
}

#[test]
fn test_purchase_then_save_persists_mutations() {
    let (_dir, stock, coins) = fixture_dir();
    // Buy Water with exact payment, then save.
    run_session(&stock, &coins, "2\nI0001\n100\n3\n");

    let stock_text = fs::read_to_string(&stock).unwrap();
    assert!(stock_text.contains("I0001|Water|Plain still water|1.00|19"));

    let coins_text = fs::read_to_string(&coins).unwrap();
    // The tendered $1 coin stays in the till: 12 -> 13.
    assert!(coins_text.contains("100,13"));
}

#[test]
fn test_add_item_then_save() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "4\nChips\nSalty snack\n1.50\n3\n");

    assert!(output.contains("The id of the new stock will be: I0004"));
    assert!(output.contains("\"I0004 - Chips - Salty snack\" has been added to the menu."));

    let stock_text = fs::read_to_string(&stock).unwrap();
    assert!(stock_text.contains("I0004|Chips|Salty snack|1.50|20"));
}

#[test]
fn test_remove_item_then_save() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "5\nI0002\n3\n");

    assert!(output.contains("has been removed from the system."));
    let stock_text = fs::read_to_string(&stock).unwrap();
    assert!(!stock_text.contains("I0002"));
}

#[test]
fn test_reset_stock_then_save() {
    let (_dir, stock, coins) = fixture_dir();
    let output = run_session(&stock, &coins, "7\n3\n");

    assert!(output.contains("All stock has been reset to the default level of 20"));
    let stock_text = fs::read_to_string(&stock).unwrap();
    assert!(stock_text.contains("I0003|Apple Pie|A slice of home-made apple pie|3.95|20"));
}

#[test]
fn test_end_of_input_exits_cleanly_without_saving() {
    let (_dir, stock, coins) = fixture_dir();
    let before = fs::read_to_string(&stock).unwrap();

    let output = run_session(&stock, &coins, "");
    assert!(output.contains("Main Menu:"));

    // No save happened; the file is untouched.
    assert_eq!(fs::read_to_string(&stock).unwrap(), before);
}
