//! Port traits decoupling the domain from adapters.

pub mod config_port;
pub mod order_source_port;
pub mod report_port;
