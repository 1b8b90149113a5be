//! Concrete adapter implementations for ports.

pub mod csv_orders_adapter;
pub mod file_config_adapter;
pub mod html_report;
