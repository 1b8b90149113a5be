//! Report generation port trait.

use crate::domain::analysis::Analysis;
use crate::domain::error::EdgemapError;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, output_path: &str) -> Result<(), EdgemapError>;
}
