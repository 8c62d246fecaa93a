//! The purchase transaction.
//!
//! A purchase moves through selection, payment collection, and change
//! resolution, and only commits when the whole operation can complete:
//! tendered coins accumulate in a scratch bundle, merge into the till just
//! before change is resolved, and are withdrawn again (an exact inverse)
//! when the till cannot produce the change. The till's total value therefore
//! moves by exactly the item price on a committed purchase and by zero on
//! every other outcome.

use crate::catalog::Catalog;
use crate::coin::{CoinBundle, CoinInventory, Denomination};
use crate::error::Result;
use crate::money::Money;
use crate::resolver;
use log::{debug, warn};

/// Supplies tendered coins one at a time during payment collection.
///
/// `owed` is how much is still outstanding, for display. Returning `None`
/// cancels the purchase (end of input or an explicit abort). Implementations
/// own input validation: only valid denominations ever reach the
/// transaction.
pub trait PaymentSource {
    fn next_coin(&mut self, owed: Money) -> Option<Denomination>;
}

/// Terminal outcome of a purchase attempt.
///
/// Only [`Committed`](PurchaseOutcome::Committed) mutates any shared state;
/// every other variant leaves the till and catalog exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Item dispensed; `change` is what the customer gets back.
    Committed {
        item_id: String,
        item_name: String,
        price: Money,
        tendered: Money,
        change: CoinBundle,
    },

    /// No item with the requested id.
    UnknownItem,

    /// The item exists but none are on hand.
    OutOfStock,

    /// The customer aborted before covering the price.
    Cancelled,

    /// The till could not produce exact change; the tendered coins were
    /// handed back.
    InsufficientChange { refunded: Money },
}

/// Runs one purchase against the shared catalog and till.
///
/// The returned error variants only cover internal till inconsistencies
/// that the resolver's bounds make unreachable in practice; business
/// failures are [`PurchaseOutcome`] variants.
pub fn purchase(
    catalog: &mut Catalog,
    till: &mut CoinInventory,
    item_id: &str,
    payment: &mut impl PaymentSource,
) -> Result<PurchaseOutcome> {
    let index = match catalog.position(|item| item.id == item_id) {
        Some(index) => index,
        None => {
            debug!("Purchase requested for unknown item {}", item_id);
            return Ok(PurchaseOutcome::UnknownItem);
        }
    };

    // Safety: position() just produced a valid index
    let item = catalog.get(index).expect("item exists");
    if item.on_hand == 0 {
        debug!("Purchase requested for out-of-stock item {}", item_id);
        return Ok(PurchaseOutcome::OutOfStock);
    }
    let price = item.price;
    let item_name = item.name.clone();

    // Collect coins into a scratch bundle; the till is untouched until the
    // price is covered.
    let mut scratch = CoinBundle::new();
    let mut tendered = Money::ZERO;
    while tendered < price {
        let owed = price.checked_sub(tendered).unwrap_or(Money::ZERO);
        match payment.next_coin(owed) {
            Some(denom) => {
                scratch.add(denom);
                tendered += Money::from_cents(denom.value());
                debug!("Accepted {}, tendered now {}", denom, tendered);
            }
            None => {
                debug!("Purchase of {} cancelled at {} tendered", item_id, tendered);
                return Ok(PurchaseOutcome::Cancelled);
            }
        }
    }

    // Safety: the collection loop only exits once tendered >= price
    let change = tendered.checked_sub(price).expect("tendered covers price");

    // The just-tendered coins are eligible to be returned as change, so the
    // merge happens before resolution.
    till.deposit_all(&scratch);

    if change.is_zero() {
        // Safety: position() just produced a valid index
        catalog.get_mut(index).expect("item exists").on_hand -= 1;
        debug!("Committed {} with exact payment {}", item_id, price);
        return Ok(PurchaseOutcome::Committed {
            item_id: item_id.to_string(),
            item_name,
            price,
            tendered,
            change: CoinBundle::new(),
        });
    }

    match resolver::resolve(change, till) {
        Some(combination) => {
            till.withdraw_all(&combination)?;
            // Safety: position() just produced a valid index
            catalog.get_mut(index).expect("item exists").on_hand -= 1;
            debug!(
                "Committed {}: price {}, tendered {}, change {}",
                item_id, price, tendered, change
            );
            Ok(PurchaseOutcome::Committed {
                item_id: item_id.to_string(),
                item_name,
                price,
                tendered,
                change: combination,
            })
        }
        None => {
            // Undo the merge exactly; the customer's money is never kept
            // when change cannot be produced.
            till.withdraw_all(&scratch)?;
            warn!(
                "No change combination for {} after {} tendered on {}",
                change, tendered, item_id
            );
            Ok(PurchaseOutcome::InsufficientChange { refunded: tendered })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    /// Yields a fixed coin sequence, then cancels.
    struct Script(Vec<Denomination>);

    impl PaymentSource for Script {
        fn next_coin(&mut self, _owed: Money) -> Option<Denomination> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    fn catalog_with(price_cents: u32, on_hand: u32) -> Catalog {
        Catalog::from_items(vec![Item::new(
            "I0001".to_string(),
            "Lemonade".to_string(),
            "Cold and fizzy".to_string(),
            Money::from_cents(price_cents),
            on_hand,
        )])
    }

    #[test]
    fn test_commit_moves_till_by_price_and_stock_by_one() {
        let mut catalog = catalog_with(250, 5);
        let mut till = CoinInventory::uniform(5);
        let before = till.total_value();

        // $2.50 paid as $2 + $1, expecting 50c change.
        let mut pay = Script(vec![Denomination::TwoDollars, Denomination::OneDollar]);
        let outcome = purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap();

        match outcome {
            PurchaseOutcome::Committed {
                price,
                tendered,
                change,
                ..
            } => {
                assert_eq!(price, Money::from_cents(250));
                assert_eq!(tendered, Money::from_cents(300));
                assert_eq!(change.total_value(), Money::from_cents(50));
            }
            other => panic!("expected Committed, got {other:?}"),
        }
        assert_eq!(till.total_value(), before + Money::from_cents(250));
        assert_eq!(catalog.get(0).unwrap().on_hand, 4);
    }

    #[test]
    fn test_exact_payment_commits_with_empty_change() {
        let mut catalog = catalog_with(200, 1);
        // A till with no coins at all: exact payment must still commit.
        let mut till = CoinInventory::uniform(0);

        let mut pay = Script(vec![Denomination::OneDollar, Denomination::OneDollar]);
        let outcome = purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap();

        match outcome {
            PurchaseOutcome::Committed { change, .. } => assert!(change.is_empty()),
            other => panic!("expected Committed, got {other:?}"),
        }
        assert_eq!(till.total_value(), Money::from_cents(200));
        assert_eq!(catalog.get(0).unwrap().on_hand, 0);
    }

    #[test]
    fn test_insufficient_change_rolls_back_exactly() {
        let mut catalog = catalog_with(95, 3);
        let mut till = CoinInventory::uniform(0);
        let before = till.clone();

        // $1 tendered against 95c: 5c change is impossible from an empty
        // till plus the tendered $1 coin.
        let mut pay = Script(vec![Denomination::OneDollar]);
        let outcome = purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap();

        assert_eq!(
            outcome,
            PurchaseOutcome::InsufficientChange {
                refunded: Money::from_cents(100)
            }
        );
        assert_eq!(till, before);
        assert_eq!(catalog.get(0).unwrap().on_hand, 3);
    }

    #[test]
    fn test_cancel_during_collection_leaves_state_untouched() {
        let mut catalog = catalog_with(200, 2);
        let mut till = CoinInventory::uniform(3);
        let till_before = till.clone();

        // 50c in, then end of input.
        let mut pay = Script(vec![Denomination::FiftyCents]);
        let outcome = purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap();

        assert_eq!(outcome, PurchaseOutcome::Cancelled);
        assert_eq!(till, till_before);
        assert_eq!(catalog.get(0).unwrap().on_hand, 2);
    }

    #[test]
    fn test_unknown_item_and_out_of_stock() {
        let mut catalog = catalog_with(100, 0);
        let mut till = CoinInventory::uniform(1);
        let before = till.clone();

        let mut pay = Script(vec![]);
        assert_eq!(
            purchase(&mut catalog, &mut till, "I0042", &mut pay).unwrap(),
            PurchaseOutcome::UnknownItem
        );
        assert_eq!(
            purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap(),
            PurchaseOutcome::OutOfStock
        );
        assert_eq!(till, before);
    }

    #[test]
    fn test_tendered_coins_are_available_for_change() {
        // Price 50c, till has nothing; paying 2 x 50c must give one of the
        // tendered 50c coins back.
        let mut catalog = catalog_with(50, 1);
        let mut till = CoinInventory::uniform(0);

        let mut pay = Script(vec![Denomination::FiftyCents, Denomination::FiftyCents]);
        let outcome = purchase(&mut catalog, &mut till, "I0001", &mut pay).unwrap();

        match outcome {
            PurchaseOutcome::Committed { change, .. } => {
                assert_eq!(change.count(Denomination::FiftyCents), 1);
            }
            other => panic!("expected Committed, got {other:?}"),
        }
        assert_eq!(till.total_value(), Money::from_cents(50));
    }
}
