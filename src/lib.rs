//! # Vending Engine
//!
//! An interactive vending-machine controller: an item catalog and a coin
//! till loaded from delimited text files, driven through a menu session that
//! can display, purchase, and administer stock.
//!
//! ## Design Principles
//!
//! - **Exact integer cents**: no floating point anywhere; `D.CC` strings are
//!   parsed through `rust_decimal`
//! - **Full change search**: exact change is found by bounded combinatorial
//!   search, since greedy selection fails on bounded coin stocks
//! - **Commit or roll back**: a purchase mutates the till and stock only
//!   when the whole transaction can complete; every other outcome restores
//!   the prior state exactly
//!
//! ## Example
//!
//! ```no_run
//! use vending_engine::VendingMachine;
//!
//! let mut machine = VendingMachine::load("stock.dat", "coins.dat").unwrap();
//! machine.reset_stock();
//! machine.save("stock.dat", "coins.dat").unwrap();
//! ```

pub mod catalog;
pub mod coin;
pub mod display;
pub mod error;
pub mod machine;
pub mod menu;
pub mod money;
pub mod prompt;
pub mod resolver;
pub mod store;
pub mod transaction;

pub use catalog::{Catalog, Item};
pub use coin::{CoinBundle, CoinInventory, Denomination};
pub use error::{MachineError, Result};
pub use machine::VendingMachine;
pub use money::Money;
pub use resolver::resolve;
pub use transaction::{PaymentSource, PurchaseOutcome};
