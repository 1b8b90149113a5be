//! Order specifications and resolved orders.

use crate::domain::direction::Direction;
use crate::domain::price_spec::PriceSpec;

/// An order as supplied by the caller: exit prices may still be percentage
/// offsets relative to the entry.
#[derive(Debug, Clone)]
pub struct OrderSpec {
    pub direction: Direction,
    pub win_rate: f64,
    pub entry_price: f64,
    pub take_profit: PriceSpec,
    pub stop_loss: PriceSpec,
}

impl OrderSpec {
    /// Resolve both exit specs against this order's own entry price.
    pub fn resolve(&self) -> ResolvedOrder {
        self.resolve_at(self.entry_price)
    }

    /// Resolve against a hypothetical entry price instead of the order's own.
    pub fn resolve_at(&self, entry_price: f64) -> ResolvedOrder {
        ResolvedOrder {
            direction: self.direction,
            win_rate: self.win_rate,
            entry_price,
            take_profit: self.take_profit.resolve(entry_price),
            stop_loss: self.stop_loss.resolve(entry_price),
        }
    }
}

/// An order with all prices resolved to absolute levels.
#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub direction: Direction,
    pub win_rate: f64,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl ResolvedOrder {
    /// Whether the exit prices sit on the profitable sides of the entry.
    ///
    /// A long must stop below the entry and take profit above it; a short is
    /// the mirror image. Orders failing this cannot lose or win as intended
    /// and are dropped rather than priced.
    pub fn has_valid_geometry(&self) -> bool {
        if self.direction.is_long() {
            self.stop_loss < self.entry_price && self.entry_price < self.take_profit
        } else {
            self.take_profit < self.entry_price && self.entry_price < self.stop_loss
        }
    }
}
