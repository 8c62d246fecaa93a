//! The vending machine: catalog plus till, and every operation the menu
//! exposes over them.
//!
//! All shared state lives in this one value; operations receive it
//! explicitly, so there is no process-wide mutable state anywhere in the
//! crate.

use crate::catalog::{Catalog, Item, DEFAULT_STOCK_LEVEL};
use crate::coin::CoinInventory;
use crate::error::Result;
use crate::money::Money;
use crate::store;
use crate::transaction::{self, PaymentSource, PurchaseOutcome};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One machine instance: the item catalog and the coin till.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingMachine {
    catalog: Catalog,
    till: CoinInventory,
}

impl VendingMachine {
    pub fn new(catalog: Catalog, till: CoinInventory) -> Self {
        VendingMachine { catalog, till }
    }

    /// Loads both data files. Either file failing to open or parse aborts
    /// the load; nothing is ever partially applied.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(stock_path: P, coin_path: Q) -> Result<Self> {
        let stock_file = File::open(stock_path.as_ref())?;
        let catalog = store::load_catalog(BufReader::new(stock_file))?;

        let coin_file = File::open(coin_path.as_ref())?;
        let till = store::load_coins(BufReader::new(coin_file))?;

        info!(
            "Loaded {} items and a till worth {}",
            catalog.len(),
            till.total_value()
        );
        Ok(VendingMachine { catalog, till })
    }

    /// Writes both data files back out.
    pub fn save<P: AsRef<Path>, Q: AsRef<Path>>(&self, stock_path: P, coin_path: Q) -> Result<()> {
        let stock_file = File::create(stock_path.as_ref())?;
        store::save_catalog(BufWriter::new(stock_file), &self.catalog)?;

        let coin_file = File::create(coin_path.as_ref())?;
        store::save_coins(BufWriter::new(coin_file), &self.till)?;

        info!("Saved stock and coin files");
        Ok(())
    }

    /// Read-only view of the catalog, for display.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only view of the till, for display.
    pub fn till(&self) -> &CoinInventory {
        &self.till
    }

    /// Runs one purchase transaction against the shared state.
    pub fn purchase(
        &mut self,
        item_id: &str,
        payment: &mut impl PaymentSource,
    ) -> Result<PurchaseOutcome> {
        transaction::purchase(&mut self.catalog, &mut self.till, item_id, payment)
    }

    /// The id the next added item will receive.
    pub fn next_item_id(&self) -> Result<String> {
        self.catalog.next_id()
    }

    /// Adds a new item at the name-ordered position, starting at the
    /// default stock level. Fields are expected to be validated already.
    pub fn add_item(&mut self, id: String, name: String, description: String, price: Money) -> Item {
        let item = Item::new(id, name, description, price, DEFAULT_STOCK_LEVEL);
        debug!("Adding item {} ({})", item.id, item.name);
        self.catalog.insert_ordered(item.clone());
        item
    }

    /// Removes the item with the given id, returning it.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let index = self.catalog.position(|item| item.id == id)?;
        let removed = self.catalog.remove_at(index);
        if let Some(item) = &removed {
            debug!("Removed item {} ({})", item.id, item.name);
        }
        removed
    }

    /// Restores every item's on-hand count to the default level.
    pub fn reset_stock(&mut self) {
        self.catalog.reset_stock();
        debug!("Stock levels reset to {}", DEFAULT_STOCK_LEVEL);
    }

    /// Restores every denomination's count to the default level.
    pub fn reset_coins(&mut self) {
        self.till.reset();
        debug!("Coin levels reset");
    }
}
