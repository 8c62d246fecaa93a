//! Exact-change resolution over a bounded coin stock.
//!
//! Greedy largest-first selection is not correct here: with a till of
//! 1 x $1, 1 x 50c, 3 x 20c and a target of $1.10, greedy takes the $1 and
//! then cannot make 10c, even though 50c + 20c + 20c + 20c works. The
//! resolver therefore searches the whole bounded combination space.

use crate::coin::{CoinBundle, CoinInventory, Denomination};
use crate::money::Money;

/// Finds a combination of available coins summing exactly to `target`,
/// minimizing the number of physical coins handed out.
///
/// Returns `None` when no exact combination exists; that is an expected
/// business outcome (the till is short on change), not an error. The till is
/// never mutated. Among combinations of equal coin count, the first one
/// found under the enumeration order (descending denominations, counts from
/// zero up) wins; callers must not rely on a stronger tie-break.
pub fn resolve(target: Money, till: &CoinInventory) -> Option<CoinBundle> {
    let mut order = Denomination::ALL;
    order.reverse();
    best_combination(&order, target.cents(), till)
}

/// Pure recursive search: assigns a count to the first denomination in
/// `denoms` and recurses over the rest with the reduced remainder. A leaf is
/// a solution only when the remainder is exactly zero.
fn best_combination(
    denoms: &[Denomination],
    remaining: u32,
    till: &CoinInventory,
) -> Option<CoinBundle> {
    let (&denom, rest) = match denoms.split_first() {
        Some(split) => split,
        None => return (remaining == 0).then(CoinBundle::new),
    };

    let value = denom.value();
    let max_fit = (remaining / value).min(till.count(denom));

    let mut best: Option<CoinBundle> = None;
    for count in 0..=max_fit {
        if let Some(mut candidate) = best_combination(rest, remaining - count * value, till) {
            candidate.set(denom, count);
            let improves = best
                .as_ref()
                .map_or(true, |b| candidate.total_coins() < b.total_coins());
            if improves {
                best = Some(candidate);
            }
        }
    }
    best
}
