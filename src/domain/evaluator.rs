//! Order evaluation: position sizing, potential P/L and expected value.

use crate::domain::direction::Direction;
use crate::domain::order::ResolvedOrder;

/// The priced risk/reward picture of one order at a given account size.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub direction: Direction,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    pub profit_loss_ratio: f64,
    pub potential_profit: f64,
    pub potential_loss: f64,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    pub capital: f64,
    pub position_value: f64,
    pub leverage: f64,
    pub win_rate: f64,
    pub expected_value: f64,
}

/// Price an order against account capital and leverage.
///
/// The full capital is deployed at the given leverage, so the position is
/// worth `capital * leverage` and sized as `position_value / entry_price`.
/// Returns `None` for orders that cannot be priced: exit prices on the
/// wrong side of the entry, or a potential loss of exactly zero.
pub fn evaluate(order: &ResolvedOrder, capital: f64, leverage: f64) -> Option<Evaluation> {
    if !order.has_valid_geometry() {
        return None;
    }

    let position_value = capital * leverage;
    let position_size = position_value / order.entry_price;

    let (potential_profit, potential_loss, take_profit_pct, stop_loss_pct) = match order.direction
    {
        Direction::Long => (
            (order.take_profit - order.entry_price) * position_size,
            (order.entry_price - order.stop_loss) * position_size,
            (order.take_profit - order.entry_price) / order.entry_price * 100.0,
            (order.stop_loss - order.entry_price) / order.entry_price * 100.0,
        ),
        Direction::Short => (
            (order.entry_price - order.take_profit) * position_size,
            (order.stop_loss - order.entry_price) * position_size,
            (order.entry_price - order.take_profit) / order.entry_price * 100.0,
            (order.stop_loss - order.entry_price) / order.entry_price * 100.0,
        ),
    };

    if potential_loss == 0.0 {
        return None;
    }

    let profit_loss_ratio = (potential_profit / potential_loss).abs();
    let expected_value =
        order.win_rate * potential_profit - (1.0 - order.win_rate) * potential_loss;

    Some(Evaluation {
        direction: order.direction,
        entry_price: order.entry_price,
        take_profit: order.take_profit,
        stop_loss: order.stop_loss,
        profit_loss_ratio,
        potential_profit,
        potential_loss,
        take_profit_pct,
        stop_loss_pct,
        capital,
        position_value,
        leverage,
        win_rate: order.win_rate,
        expected_value,
    })
}
