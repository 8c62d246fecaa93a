//! The interactive menu session.
//!
//! Every flow reads from one `BufRead` and writes to one `Write`, both
//! passed in explicitly, so the whole session can be driven from buffers in
//! tests. Multi-step flows (add, remove, purchase) abort cleanly on an empty
//! line or end of input, leaving shared state untouched.

use crate::catalog::{parse_description, parse_item_id, parse_name, DEFAULT_STOCK_LEVEL};
use crate::coin::{parse_denomination, Denomination, DEFAULT_COIN_COUNT};
use crate::display;
use crate::error::Result;
use crate::machine::VendingMachine;
use crate::money::Money;
use crate::prompt::prompt_until;
use crate::transaction::{PaymentSource, PurchaseOutcome};
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    DisplayItems,
    PurchaseItem,
    SaveAndExit,
    AddItem,
    RemoveItem,
    DisplayCoins,
    ResetStock,
    ResetCoins,
    Abort,
}

impl MenuChoice {
    fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::DisplayItems),
            2 => Some(MenuChoice::PurchaseItem),
            3 => Some(MenuChoice::SaveAndExit),
            4 => Some(MenuChoice::AddItem),
            5 => Some(MenuChoice::RemoveItem),
            6 => Some(MenuChoice::DisplayCoins),
            7 => Some(MenuChoice::ResetStock),
            8 => Some(MenuChoice::ResetCoins),
            9 => Some(MenuChoice::Abort),
            _ => None,
        }
    }
}

fn parse_choice(s: &str) -> std::result::Result<MenuChoice, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| "input was not a valid number".to_string())?;
    MenuChoice::from_number(n).ok_or_else(|| "menu item selected is not valid".to_string())
}

fn write_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Main Menu:")?;
    writeln!(output, "  1.Display Items")?;
    writeln!(output, "  2.Purchase Items")?;
    writeln!(output, "  3.Save and Exit")?;
    writeln!(output, "Administrator-Only Menu:")?;
    writeln!(output, "  4.Add Item")?;
    writeln!(output, "  5.Remove Item")?;
    writeln!(output, "  6.Display Coins")?;
    writeln!(output, "  7.Reset Stock")?;
    writeln!(output, "  8.Reset Coins")?;
    writeln!(output, "  9.Abort Program")
}

fn blank<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output)?;
    Ok(())
}

/// Runs the menu loop until save-and-exit, abort, or end of input.
pub fn run<R: BufRead, W: Write>(
    machine: &mut VendingMachine,
    stock_path: &Path,
    coin_path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        write_menu(output)?;
        let choice = match prompt_until(input, output, "Select your option (1-9): ", parse_choice)? {
            Some(choice) => choice,
            None => break,
        };
        writeln!(output)?;

        match choice {
            MenuChoice::DisplayItems => display::render_stock(output, machine.catalog())?,
            MenuChoice::PurchaseItem => purchase_flow(machine, input, output)?,
            MenuChoice::SaveAndExit => {
                machine.save(stock_path, coin_path)?;
                writeln!(output, "Stock list and coin list has been saved")?;
                blank(output)?;
                break;
            }
            MenuChoice::AddItem => add_item_flow(machine, input, output)?,
            MenuChoice::RemoveItem => remove_item_flow(machine, input, output)?,
            MenuChoice::DisplayCoins => display::render_coins(output, machine.till())?,
            MenuChoice::ResetStock => {
                machine.reset_stock();
                writeln!(
                    output,
                    "All stock has been reset to the default level of {DEFAULT_STOCK_LEVEL}"
                )?;
                blank(output)?;
            }
            MenuChoice::ResetCoins => {
                machine.reset_coins();
                writeln!(
                    output,
                    "All coins have been reset to the default level of {DEFAULT_COIN_COUNT}"
                )?;
                blank(output)?;
            }
            MenuChoice::Abort => {
                writeln!(output, "Program Terminated")?;
                break;
            }
        }
    }
    Ok(())
}

/// Prompts the customer for coins during a purchase; re-asks on invalid
/// denominations and cancels on empty input or EOF.
struct PromptPayment<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> PaymentSource for PromptPayment<'_, R, W> {
    fn next_coin(&mut self, owed: Money) -> Option<Denomination> {
        let prompt = format!("You still need to give us {owed}: ");
        match prompt_until(&mut *self.input, &mut *self.output, &prompt, parse_denomination) {
            Ok(choice) => choice,
            // Treat an I/O failure like an abort; the transaction rolls the
            // rest back.
            Err(_) => None,
        }
    }
}

fn purchase_flow<R: BufRead, W: Write>(
    machine: &mut VendingMachine,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    const TERMINATED: &str = "Terminated Purchase Item";

    let selection = prompt_until(
        input,
        output,
        "Please enter the id of the item you wish to purchase: ",
        |s| {
            let id = parse_item_id(s)?;
            if machine.catalog().find_by_id(&id).is_none() {
                return Err("Item Id does not exist".to_string());
            }
            Ok(id)
        },
    )?;
    let id = match selection {
        Some(id) => id,
        None => {
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };

    let item = match machine.catalog().find_by_id(&id) {
        Some(item) => item.clone(),
        // The validator above only accepts existing ids.
        None => return blank(output),
    };
    if item.on_hand == 0 {
        writeln!(output, "Error: Cannot purchase that item as there is none left")?;
        writeln!(output, "{TERMINATED}")?;
        return blank(output);
    }

    writeln!(
        output,
        "You have selected \"{} - {}\". This will cost you {}.",
        item.name,
        item.short_description(),
        item.price
    )?;
    writeln!(
        output,
        "Please hand over the money - type in the value of each note/coin in cents."
    )?;
    writeln!(
        output,
        "Press enter or ctrl-d on a new line to cancel this purchase:"
    )?;

    let outcome = {
        let mut payment = PromptPayment {
            input: &mut *input,
            output: &mut *output,
        };
        machine.purchase(&id, &mut payment)?
    };

    match outcome {
        PurchaseOutcome::Committed {
            item_name, change, ..
        } => {
            if change.is_empty() {
                writeln!(output, "Here is your {item_name} with no change")?;
            } else {
                writeln!(
                    output,
                    "Here is your {} and change of {}: {}",
                    item_name,
                    change.total_value(),
                    change
                )?;
            }
        }
        PurchaseOutcome::Cancelled => writeln!(output, "{TERMINATED}")?,
        PurchaseOutcome::InsufficientChange { .. } => {
            writeln!(output, "We do not have enough coins for the change")?;
            writeln!(output, "{TERMINATED}")?;
        }
        PurchaseOutcome::UnknownItem => writeln!(output, "Error: Item Id does not exist")?,
        PurchaseOutcome::OutOfStock => {
            writeln!(output, "Error: Cannot purchase that item as there is none left")?;
            writeln!(output, "{TERMINATED}")?;
        }
    }
    blank(output)
}

fn add_item_flow<R: BufRead, W: Write>(
    machine: &mut VendingMachine,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    const TERMINATED: &str = "Terminated Add Item";

    let new_id = match machine.next_item_id() {
        Ok(id) => id,
        Err(e) => {
            writeln!(output, "Error: {e}")?;
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };
    writeln!(output, "The id of the new stock will be: {new_id}")?;

    let name = match prompt_until(input, output, "Enter the item name: ", parse_name)? {
        Some(name) => name,
        None => {
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };
    let description = match prompt_until(
        input,
        output,
        "Enter the item description: ",
        parse_description,
    )? {
        Some(description) => description,
        None => {
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };
    let price = match prompt_until(input, output, "Enter the price for the item: ", |s| {
        Money::parse_price(s).map_err(|e| e.to_string())
    })? {
        Some(price) => price,
        None => {
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };

    let item = machine.add_item(new_id, name, description, price);
    writeln!(
        output,
        "\"{} - {} - {}\" has been added to the menu.",
        item.id, item.name, item.description
    )?;
    blank(output)
}

fn remove_item_flow<R: BufRead, W: Write>(
    machine: &mut VendingMachine,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    const TERMINATED: &str = "Terminated Remove Item";

    if machine.catalog().is_empty() {
        writeln!(output, "Error: Cannot remove more items from an empty stock list")?;
        writeln!(output, "{TERMINATED}")?;
        return blank(output);
    }

    let selection = prompt_until(
        input,
        output,
        "Enter the item id of the item to remove from the menu: ",
        |s| {
            let id = parse_item_id(s)?;
            if machine.catalog().find_by_id(&id).is_none() {
                return Err("Item Id does not exist".to_string());
            }
            Ok(id)
        },
    )?;
    let id = match selection {
        Some(id) => id,
        None => {
            writeln!(output, "{TERMINATED}")?;
            return blank(output);
        }
    };

    if let Some(item) = machine.remove_item(&id) {
        writeln!(
            output,
            "\"{} - {} - {}\" has been removed from the system.",
            item.id, item.name, item.description
        )?;
    }
    blank(output)
}
