//! Core domain types and logic.

pub mod direction;
pub mod price_spec;
pub mod order;
pub mod evaluator;
pub mod analysis;
pub mod expectancy;
pub mod error;
