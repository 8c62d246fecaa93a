//! Loading and saving the machine's two data files.
//!
//! Coin records are `<value-in-cents>,<count>`; stock records are
//! `<id>|<name>|<description>|<price D.CC>|<on-hand>`. Both are plain
//! delimited text with one record per line and no header. Load failures
//! identify the offending record by its 1-indexed position and the reason.

use crate::catalog::{parse_description, parse_item_id, parse_name, Catalog, Item};
use crate::coin::{parse_denomination, CoinInventory, Denomination, NUM_DENOMS};
use crate::error::{MachineError, Result};
use crate::money::Money;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{Read, Write};

const COIN_DELIM: u8 = b',';
const STOCK_DELIM: u8 = b'|';
const COIN_FIELDS: usize = 2;
const STOCK_FIELDS: usize = 5;

/// Raw coin record as read from the coin file, before validation.
#[derive(Debug, Deserialize)]
struct RawCoinRecord {
    value: String,
    count: String,
}

/// Raw stock record as read from the stock file, before validation.
#[derive(Debug, Deserialize)]
struct RawItemRecord {
    id: String,
    name: String,
    description: String,
    price: String,
    on_hand: String,
}

fn coin_err(record: usize, message: impl Into<String>) -> MachineError {
    MachineError::CoinRecord {
        record,
        message: message.into(),
    }
}

fn item_err(record: usize, message: impl Into<String>) -> MachineError {
    MachineError::ItemRecord {
        record,
        message: message.into(),
    }
}

/// Reads a coin inventory.
///
/// The source must supply each of the eight denominations exactly once;
/// duplicates, omissions, malformed values, and wrong field counts are all
/// rejected with the record number.
pub fn load_coins<R: Read>(reader: R) -> Result<CoinInventory> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(COIN_DELIM)
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut seen: Vec<(Denomination, u32)> = Vec::with_capacity(NUM_DENOMS);

    for (idx, result) in csv_reader.records().enumerate() {
        let record_no = idx + 1;
        let record = result?;

        if record.len() != COIN_FIELDS {
            return Err(coin_err(
                record_no,
                format!("needs to have {COIN_FIELDS} attributes"),
            ));
        }
        let raw: RawCoinRecord = record
            .deserialize(None)
            .map_err(|e| coin_err(record_no, e.to_string()))?;

        let denom =
            parse_denomination(&raw.value).map_err(|message| coin_err(record_no, message))?;
        if seen.iter().any(|(d, _)| *d == denom) {
            return Err(coin_err(record_no, "Denomination already exists"));
        }
        let count: u32 = raw
            .count
            .parse()
            .map_err(|_| coin_err(record_no, "Quantity needs to be a valid integer"))?;

        seen.push((denom, count));
    }

    let mut counts = [0u32; NUM_DENOMS];
    for (slot, denom) in Denomination::ALL.iter().enumerate() {
        match seen.iter().find(|(d, _)| d == denom) {
            Some((_, count)) => counts[slot] = *count,
            None => return Err(MachineError::MissingDenomination(*denom)),
        }
    }

    debug!("Loaded coin inventory with {} denominations", NUM_DENOMS);
    Ok(CoinInventory::from_counts(counts))
}

/// Writes a coin inventory, ascending by denomination value.
pub fn save_coins<W: Write>(writer: W, till: &CoinInventory) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(COIN_DELIM)
        .from_writer(writer);

    for (denom, count) in till.iter() {
        csv_writer.write_record([denom.value().to_string(), count.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Reads the item catalog, sorted by name on the way in.
///
/// Every field is validated with the same rules the interactive prompts
/// apply; duplicate ids and wrong field counts are rejected with the record
/// number.
pub fn load_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(STOCK_DELIM)
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut items: Vec<Item> = Vec::new();
    let mut unique_ids: HashSet<String> = HashSet::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let record_no = idx + 1;
        let record = result?;

        if record.len() != STOCK_FIELDS {
            return Err(item_err(
                record_no,
                format!("needs to have {STOCK_FIELDS} attributes"),
            ));
        }
        let raw: RawItemRecord = record
            .deserialize(None)
            .map_err(|e| item_err(record_no, e.to_string()))?;

        let id = parse_item_id(&raw.id).map_err(|message| item_err(record_no, message))?;
        if !unique_ids.insert(id.clone()) {
            return Err(item_err(record_no, "Item Id already exists"));
        }
        let name = parse_name(&raw.name).map_err(|message| item_err(record_no, message))?;
        let description =
            parse_description(&raw.description).map_err(|message| item_err(record_no, message))?;
        let price =
            Money::parse_price(&raw.price).map_err(|e| item_err(record_no, e.to_string()))?;
        let on_hand: u32 = raw
            .on_hand
            .parse()
            .map_err(|_| item_err(record_no, "On hand needs to be a valid integer"))?;

        items.push(Item::new(id, name, description, price, on_hand));
    }

    debug!("Loaded {} catalog items", items.len());
    Ok(Catalog::from_items(items))
}

/// Writes the catalog in its current (name) order.
pub fn save_catalog<W: Write>(writer: W, catalog: &Catalog) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(STOCK_DELIM)
        .from_writer(writer);

    for item in catalog.iter() {
        csv_writer.write_record([
            item.id.clone(),
            item.name.clone(),
            item.description.clone(),
            format!("{}.{:02}", item.price.dollars(), item.price.cents_part()),
            item.on_hand.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
