mod summary;
pub mod views;

pub use summary::{LedgerReport, ReportInputs};
