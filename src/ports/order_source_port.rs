//! Order input port trait.

use crate::domain::error::EdgemapError;
use crate::domain::order::OrderSpec;

/// Port for loading the orders to analyze.
pub trait OrderSourcePort {
    fn load_orders(&self) -> Result<Vec<OrderSpec>, EdgemapError>;
}
