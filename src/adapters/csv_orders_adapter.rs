//! Orders CSV adapter.
//!
//! Reads `direction,win_rate,entry_price,take_profit,stop_loss` rows.
//! Columns are positional; the header line is required but its names are
//! not checked. Row numbers in errors count data rows, not file lines.

use crate::domain::direction::Direction;
use crate::domain::error::{EdgemapError, ParseError};
use crate::domain::order::OrderSpec;
use crate::domain::price_spec::PriceSpec;
use crate::ports::order_source_port::OrderSourcePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvOrdersAdapter {
    path: PathBuf,
}

impl CsvOrdersAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn file_error(&self, reason: String) -> EdgemapError {
        EdgemapError::OrdersFile {
            file: self.path.display().to_string(),
            reason,
        }
    }

    /// Wraps a price spec parse failure with the offending cell and a caret.
    fn spec_error(&self, row: usize, field: &str, cell: &str, err: ParseError) -> EdgemapError {
        let caret = " ".repeat(err.position) + "^";
        EdgemapError::Parse(ParseError {
            message: format!(
                "invalid {field} in row {row}:\n{cell}\n{caret}\n{}",
                err.message
            ),
            position: err.position,
        })
    }
}

impl OrderSourcePort for CsvOrdersAdapter {
    fn load_orders(&self) -> Result<Vec<OrderSpec>, EdgemapError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.file_error(format!("failed to read file: {}", e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut orders = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            let row = i + 1;
            let record = result
                .map_err(|e| self.file_error(format!("row {}: CSV parse error: {}", row, e)))?;

            let direction: Direction = record
                .get(0)
                .ok_or_else(|| self.file_error(format!("row {}: missing direction column", row)))?
                .parse()
                .map_err(|e| self.file_error(format!("row {}: {}", row, e)))?;

            let win_rate: f64 = record
                .get(1)
                .ok_or_else(|| self.file_error(format!("row {}: missing win_rate column", row)))?
                .trim()
                .parse()
                .map_err(|e| self.file_error(format!("row {}: invalid win_rate: {}", row, e)))?;
            if !(win_rate > 0.0 && win_rate < 1.0) {
                return Err(self.file_error(format!(
                    "row {}: win_rate must be between 0 and 1 (exclusive), got {}",
                    row, win_rate
                )));
            }

            let entry_price: f64 = record
                .get(2)
                .ok_or_else(|| {
                    self.file_error(format!("row {}: missing entry_price column", row))
                })?
                .trim()
                .parse()
                .map_err(|e| {
                    self.file_error(format!("row {}: invalid entry_price: {}", row, e))
                })?;
            if entry_price <= 0.0 {
                return Err(self.file_error(format!(
                    "row {}: entry_price must be positive, got {}",
                    row, entry_price
                )));
            }

            let take_profit_cell = record
                .get(3)
                .ok_or_else(|| {
                    self.file_error(format!("row {}: missing take_profit column", row))
                })?;
            let take_profit: PriceSpec = take_profit_cell
                .parse()
                .map_err(|e| self.spec_error(row, "take_profit", take_profit_cell, e))?;

            let stop_loss_cell = record
                .get(4)
                .ok_or_else(|| self.file_error(format!("row {}: missing stop_loss column", row)))?;
            let stop_loss: PriceSpec = stop_loss_cell
                .parse()
                .map_err(|e| self.spec_error(row, "stop_loss", stop_loss_cell, e))?;

            orders.push(OrderSpec {
                direction,
                win_rate,
                entry_price,
                take_profit,
                stop_loss,
            });
        }

        Ok(orders)
    }
}
