//! Batch analysis of order specs against one account.
//!
//! Resolves each spec, prices it, and keeps a ledger of orders that were
//! dropped so callers can report them.

use crate::domain::direction::Direction;
use crate::domain::evaluator::{Evaluation, evaluate};
use crate::domain::order::OrderSpec;
use std::fmt;

/// Result of analyzing a batch of orders.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub capital: f64,
    pub leverage: f64,
    pub evaluations: Vec<Evaluation>,
    pub skipped: Vec<SkippedOrder>,
}

impl Analysis {
    /// True when no order survived evaluation.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}

/// An order dropped during analysis, recorded by its zero-based input index.
#[derive(Debug, Clone)]
pub struct SkippedOrder {
    pub index: usize,
    pub direction: Direction,
    pub entry_price: f64,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidGeometry,
    ZeroLoss,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidGeometry => write!(f, "exit prices on the wrong side of entry"),
            SkipReason::ZeroLoss => write!(f, "zero potential loss"),
        }
    }
}

/// Resolve and price every order, preserving input order among the results.
///
/// Orders that cannot be priced are dropped, never failed: one bad order
/// must not sink the batch.
pub fn analyze_orders(orders: &[OrderSpec], capital: f64, leverage: f64) -> Analysis {
    let mut evaluations = Vec::new();
    let mut skipped = Vec::new();

    for (index, order) in orders.iter().enumerate() {
        let resolved = order.resolve();
        match evaluate(&resolved, capital, leverage) {
            Some(evaluation) => evaluations.push(evaluation),
            None => {
                let reason = if resolved.has_valid_geometry() {
                    SkipReason::ZeroLoss
                } else {
                    SkipReason::InvalidGeometry
                };
                skipped.push(SkippedOrder {
                    index,
                    direction: resolved.direction,
                    entry_price: resolved.entry_price,
                    reason,
                });
            }
        }
    }

    Analysis {
        capital,
        leverage,
        evaluations,
        skipped,
    }
}
