mod parser;

use super::domain::{Payment, ValidationError};
use chrono_tz::Tz;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum PaymentImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { row: usize, source: ValidationError },
}

impl std::fmt::Display for PaymentImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentImportError::Io(err) => write!(f, "failed to read payment export: {}", err),
            PaymentImportError::Csv(err) => write!(f, "invalid payment CSV data: {}", err),
            PaymentImportError::Row { row, source } => {
                write!(f, "payment CSV row {} rejected: {}", row, source)
            }
        }
    }
}

impl std::error::Error for PaymentImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaymentImportError::Io(err) => Some(err),
            PaymentImportError::Csv(err) => Some(err),
            PaymentImportError::Row { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for PaymentImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PaymentImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads payments from a CSV export with headers
/// `id,amount,due_date,paid_date,verified,status`.
pub struct PaymentCsvImporter;

impl PaymentCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        timezone: Tz,
    ) -> Result<Vec<Payment>, PaymentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, timezone)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        timezone: Tz,
    ) -> Result<Vec<Payment>, PaymentImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut payments = Vec::with_capacity(rows.len());

        for row in rows {
            let row_number = row.row;
            let payment = row
                .into_record()
                .and_then(|record| Payment::from_record(record, timezone))
                .map_err(|source| {
                    warn!(row = row_number, error = %source, "rejected payment row");
                    PaymentImportError::Row {
                        row: row_number,
                        source,
                    }
                })?;
            payments.push(payment);
        }

        debug!(count = payments.len(), "imported payments from CSV");
        Ok(payments)
    }
}
