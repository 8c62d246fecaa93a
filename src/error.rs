//! Error types for the vending machine.

use crate::coin::Denomination;
use thiserror::Error;

/// Result type alias for machine operations
pub type Result<T> = std::result::Result<T, MachineError>;

/// Errors that can occur while loading, saving, or operating the machine.
///
/// Business-rule failures (out-of-stock item, insufficient change, a
/// cancelled purchase) are not errors; they are reported as
/// [`PurchaseOutcome`](crate::transaction::PurchaseOutcome) variants.
#[derive(Error, Debug)]
pub enum MachineError {
    /// Failed to open, read, or write a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited input could not be read at all
    #[error("parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid record in the coin file
    #[error("Coin No. {record} failed, {message}")]
    CoinRecord { record: usize, message: String },

    /// Invalid record in the stock file
    #[error("Item No. {record} failed, {message}")]
    ItemRecord { record: usize, message: String },

    /// The coin file did not supply every denomination
    #[error("coins file must contain all denominations, missing {0}")]
    MissingDenomination(Denomination),

    /// A withdrawal asked for more coins than the till holds
    #[error("till has {available} x {denomination}, cannot withdraw {requested}")]
    TillShort {
        denomination: Denomination,
        requested: u32,
        available: u32,
    },

    /// Every id in the item namespace is taken
    #[error("ran out of item ids")]
    IdSpaceExhausted,

    /// Wrong command-line arguments
    #[error("Expected a stock file and a coin file. Usage: vending-engine <stockfile> <coinfile>")]
    Usage,
}
