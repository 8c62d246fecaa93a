//! Vending Engine CLI
//!
//! Loads the stock and coin files named on the command line and runs the
//! interactive menu session on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- stock.dat coins.dat
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::io;
use std::path::Path;
use std::process;
use vending_engine::{menu, MachineError, Result, VendingMachine};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err(MachineError::Usage);
    }

    let stock_path = Path::new(&args[1]);
    let coin_path = Path::new(&args[2]);

    let mut machine = VendingMachine::load(stock_path, coin_path)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    menu::run(&mut machine, stock_path, coin_path, &mut input, &mut output)?;

    Ok(())
}
