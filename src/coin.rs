//! Coin denominations, the machine's till, and coin bundles.
//!
//! The till maintains the invariant that every denomination has exactly one
//! non-negative count; withdrawals check stock before mutating anything.

use crate::error::{MachineError, Result};
use crate::money::Money;
use std::fmt;

/// Number of denominations in the fixed currency set.
pub const NUM_DENOMS: usize = 8;

/// Count every slot is set to by an administrative coin reset.
pub const DEFAULT_COIN_COUNT: u32 = 20;

/// The eight face values accepted by the machine, ordered by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    FiveCents,
    TenCents,
    TwentyCents,
    FiftyCents,
    OneDollar,
    TwoDollars,
    FiveDollars,
    TenDollars,
}

impl Denomination {
    /// All denominations in ascending value order.
    pub const ALL: [Denomination; NUM_DENOMS] = [
        Denomination::FiveCents,
        Denomination::TenCents,
        Denomination::TwentyCents,
        Denomination::FiftyCents,
        Denomination::OneDollar,
        Denomination::TwoDollars,
        Denomination::FiveDollars,
        Denomination::TenDollars,
    ];

    /// Face value in cents.
    pub fn value(&self) -> u32 {
        match self {
            Denomination::FiveCents => 5,
            Denomination::TenCents => 10,
            Denomination::TwentyCents => 20,
            Denomination::FiftyCents => 50,
            Denomination::OneDollar => 100,
            Denomination::TwoDollars => 200,
            Denomination::FiveDollars => 500,
            Denomination::TenDollars => 1000,
        }
    }

    /// Compact label for change read-outs: `5c` .. `50c`, `$1` .. `$10`.
    pub fn short_label(&self) -> String {
        let value = self.value();
        if value >= 100 {
            format!("${}", value / 100)
        } else {
            format!("{value}c")
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<u32> for Denomination {
    type Error = u32;

    /// Maps a cent value to its denomination; the rejected value is handed
    /// back for error reporting.
    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or(value)
    }
}

impl fmt::Display for Denomination {
    /// Table label: `5 Cents` .. `50 Cents`, `1 Dollar`, `2 Dollars`, ...
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value();
        if value >= 100 {
            let dollars = value / 100;
            if dollars == 1 {
                write!(f, "1 Dollar")
            } else {
                write!(f, "{dollars} Dollars")
            }
        } else {
            write!(f, "{value} Cents")
        }
    }
}

/// Parses user/file input (a cent value) into a denomination.
///
/// The error is a ready-to-print message: non-integers and integers that are
/// not one of the eight face values are reported differently.
pub fn parse_denomination(s: &str) -> std::result::Result<Denomination, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| "Denomination needs to be a valid integer".to_string())?;
    Denomination::try_from(value).map_err(|v| {
        format!(
            "{} is not a valid denomination of money",
            Money::from_cents(v)
        )
    })
}

/// The coin stock of the machine: one count per denomination.
///
/// Constructed by the loader (which guarantees all eight denominations were
/// supplied exactly once) or by [`CoinInventory::uniform`]. Counts only move
/// through [`deposit`](CoinInventory::deposit) and
/// [`withdraw`](CoinInventory::withdraw), so they can never go negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinInventory {
    counts: [u32; NUM_DENOMS],
}

impl CoinInventory {
    /// Builds a till from per-denomination counts, ordered as
    /// [`Denomination::ALL`].
    pub fn from_counts(counts: [u32; NUM_DENOMS]) -> Self {
        CoinInventory { counts }
    }

    /// Builds a till holding `count` of every denomination.
    pub fn uniform(count: u32) -> Self {
        CoinInventory {
            counts: [count; NUM_DENOMS],
        }
    }

    /// Coins on hand for one denomination.
    pub fn count(&self, denom: Denomination) -> u32 {
        self.counts[denom.index()]
    }

    /// Total value of every coin in the till.
    pub fn total_value(&self) -> Money {
        let cents = Denomination::ALL
            .iter()
            .map(|d| d.value() * self.count(*d))
            .sum();
        Money::from_cents(cents)
    }

    /// Adds `count` coins of a denomination. Always succeeds.
    pub fn deposit(&mut self, denom: Denomination, count: u32) {
        self.counts[denom.index()] += count;
    }

    /// Removes `count` coins of a denomination.
    ///
    /// Fails without mutating anything when the till holds fewer than
    /// `count`.
    pub fn withdraw(&mut self, denom: Denomination, count: u32) -> Result<()> {
        let available = self.count(denom);
        if count > available {
            return Err(MachineError::TillShort {
                denomination: denom,
                requested: count,
                available,
            });
        }
        self.counts[denom.index()] -= count;
        Ok(())
    }

    /// Merges a whole bundle into the till.
    pub fn deposit_all(&mut self, bundle: &CoinBundle) {
        for (denom, count) in bundle.iter() {
            self.deposit(denom, count);
        }
    }

    /// Removes a whole bundle from the till.
    ///
    /// Every denomination is checked before any count is touched, so a
    /// failure leaves the till exactly as it was.
    pub fn withdraw_all(&mut self, bundle: &CoinBundle) -> Result<()> {
        for (denom, count) in bundle.iter() {
            let available = self.count(denom);
            if count > available {
                return Err(MachineError::TillShort {
                    denomination: denom,
                    requested: count,
                    available,
                });
            }
        }
        for (denom, count) in bundle.iter() {
            self.counts[denom.index()] -= count;
        }
        Ok(())
    }

    /// Sets every denomination back to [`DEFAULT_COIN_COUNT`].
    pub fn reset(&mut self) {
        self.counts = [DEFAULT_COIN_COUNT; NUM_DENOMS];
    }

    /// Iterates `(denomination, count)` in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.count(d)))
    }
}

/// A handful of coins: a count per denomination, zeros allowed.
///
/// Serves both as the scratch buffer for coins tendered during a purchase
/// and as a change combination produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoinBundle {
    counts: [u32; NUM_DENOMS],
}

impl CoinBundle {
    /// A bundle with no coins in it.
    pub fn new() -> Self {
        CoinBundle::default()
    }

    /// Coins of one denomination in the bundle.
    pub fn count(&self, denom: Denomination) -> u32 {
        self.counts[denom.index()]
    }

    /// Adds a single coin.
    pub fn add(&mut self, denom: Denomination) {
        self.counts[denom.index()] += 1;
    }

    /// Sets the count for one denomination.
    pub fn set(&mut self, denom: Denomination, count: u32) {
        self.counts[denom.index()] = count;
    }

    /// Total value of the bundle.
    pub fn total_value(&self) -> Money {
        let cents = Denomination::ALL
            .iter()
            .map(|d| d.value() * self.count(*d))
            .sum();
        Money::from_cents(cents)
    }

    /// Number of physical coins in the bundle.
    pub fn total_coins(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Returns `true` when the bundle holds no coins at all.
    pub fn is_empty(&self) -> bool {
        self.total_coins() == 0
    }

    /// Iterates `(denomination, count)` over non-zero entries in ascending
    /// value order.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL
            .into_iter()
            .map(|d| (d, self.count(d)))
            .filter(|(_, c)| *c > 0)
    }

    /// Same as [`iter`](CoinBundle::iter) but highest denomination first,
    /// the order change is handed to a customer.
    pub fn iter_desc(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL
            .into_iter()
            .rev()
            .map(|d| (d, self.count(d)))
            .filter(|(_, c)| *c > 0)
    }
}

impl fmt::Display for CoinBundle {
    /// Change read-out, highest first: `2x$1 50c 5c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denom, count) in self.iter_desc() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if count > 1 {
                write!(f, "{count}x{}", denom.short_label())?;
            } else {
                write!(f, "{}", denom.short_label())?;
            }
        }
        Ok(())
    }
}
