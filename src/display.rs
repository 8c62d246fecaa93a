//! Fixed-width table rendering for the item menu and the coin summary.

use crate::catalog::Catalog;
use crate::coin::CoinInventory;
use std::io::{self, Write};

const ID_WIDTH: usize = 5;
const NAME_WIDTH: usize = 40;
const AVAILABLE_WIDTH: usize = 11;
const PRICE_WIDTH: usize = 8;

const DENOM_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 10;

fn rule(len: usize) -> String {
    "-".repeat(len)
}

/// Writes the item menu table.
pub fn render_stock<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    let title = "Items Menu";
    let row_len = ID_WIDTH + NAME_WIDTH + AVAILABLE_WIDTH + PRICE_WIDTH + 3;

    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule(title.len()))?;
    writeln!(
        out,
        "{:<ID_WIDTH$}|{:<NAME_WIDTH$}|{:<AVAILABLE_WIDTH$}|{:<PRICE_WIDTH$}",
        "ID", "Name", " Available", " Price"
    )?;
    writeln!(out, "{}", rule(row_len))?;

    for item in catalog.iter() {
        writeln!(
            out,
            "{:<ID_WIDTH$}|{:<NAME_WIDTH$}|{:<AVAILABLE_WIDTH$}|{:<PRICE_WIDTH$}",
            item.id,
            item.name,
            item.on_hand,
            item.price.to_string()
        )?;
    }

    if catalog.is_empty() {
        let empty_msg = "EMPTY ITEM LIST";
        writeln!(out, "{}{}", " ".repeat((row_len - empty_msg.len()) / 2), empty_msg)?;
    }
    writeln!(out)
}

/// Writes the coin summary table, ascending by denomination value.
pub fn render_coins<W: Write>(out: &mut W, till: &CoinInventory) -> io::Result<()> {
    let title = "Coins Summary";
    let row_len = DENOM_WIDTH + COUNT_WIDTH + 1;

    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule(title.len()))?;
    writeln!(out, "{:<DENOM_WIDTH$}|{:>COUNT_WIDTH$}", "Denomination", "Count ")?;
    writeln!(out, "{}", rule(row_len))?;

    for (denom, count) in till.iter() {
        writeln!(
            out,
            "{:<DENOM_WIDTH$}|{:>COUNT_WIDTH$}",
            denom.to_string(),
            count
        )?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use crate::money::Money;

    #[test]
    fn test_stock_table_layout() {
        let catalog = Catalog::from_items(vec![Item::new(
            "I0001".to_string(),
            "Water".to_string(),
            "Plain still water".to_string(),
            Money::from_cents(100),
            20,
        )]);

        let mut out = Vec::new();
        render_stock(&mut out, &catalog).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Items Menu\n----------\n"));
        assert!(text.contains("ID   |Name"));
        assert!(text.contains("I0001|Water"));
        assert!(text.contains("$1.00"));
    }

    #[test]
    fn test_empty_stock_table_has_placeholder() {
        let mut out = Vec::new();
        render_stock(&mut out, &Catalog::new()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("EMPTY ITEM LIST"));
    }

    #[test]
    fn test_coin_table_lists_all_denominations() {
        let mut out = Vec::new();
        render_coins(&mut out, &CoinInventory::uniform(7)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Coins Summary\n"));
        assert!(text.contains("5 Cents"));
        assert!(text.contains("10 Dollars"));
        assert_eq!(text.matches("         7").count(), 8);
    }
}
