//! Payment status, streak, and rent score derivation.
//!
//! Everything here is a pure function of already-fetched records plus an
//! explicit evaluation date. The service and router wrap those functions with
//! record validation for the HTTP surface.

pub mod classifier;
pub mod dates;
pub mod domain;
pub mod import;
pub mod report;
pub mod router;
pub mod score;
pub mod service;
pub mod statistics;
pub mod streak;

#[cfg(test)]
mod tests;

pub use classifier::classify;
pub use dates::{parse_calendar_day, Clock, FixedClock, SystemClock};
pub use domain::{
    validate_payments, validate_properties, Payment, PaymentId, PaymentLifecycle, PaymentRecord,
    PaymentStatus, Property, PropertyId, PropertyRecord, ValidationError,
};
pub use import::{PaymentCsvImporter, PaymentImportError};
pub use report::{LedgerReport, ReportInputs};
pub use router::ledger_router;
pub use score::{compute_score, ScoreBreakdown, ScoreComponent, ScoreInputs, MAX_SCORE};
pub use service::{ClassifyRequest, ClassifyResponse, LedgerService, ReportRequest, StreakRequest};
pub use statistics::{rent_to_income_score, PaymentStatistics};
pub use streak::{compute_streak, ON_TIME_GRACE_DAYS};
