use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::LedgerConfig;
use crate::ledger::dates::FixedClock;
use crate::ledger::domain::PaymentRecord;
use crate::ledger::service::LedgerService;

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 3, 10)
}

pub(super) fn record(
    id: &str,
    due: &str,
    paid: Option<&str>,
    verified: bool,
) -> PaymentRecord {
    let lifecycle = if paid.is_some() { "paid" } else { "pending" };
    PaymentRecord {
        id: id.to_string(),
        amount: Some(rust_decimal::Decimal::new(95000, 2)),
        due_date: Some(due.to_string()),
        paid_date: paid.map(str::to_string),
        verified: Some(verified),
        is_verified: None,
        status: Some(lifecycle.to_string()),
    }
}

/// March and February on time and verified, January never paid.
pub(super) fn quarter_history() -> Vec<PaymentRecord> {
    vec![
        record("pay-mar", "2024-03-01", Some("2024-03-01"), true),
        record("pay-feb", "2024-02-01", Some("2024-02-03"), true),
        record("pay-jan", "2024-01-01", None, false),
    ]
}

pub(super) fn service() -> LedgerService<FixedClock> {
    LedgerService::new(LedgerConfig::default(), Arc::new(FixedClock(today())))
}

pub(super) fn ledger_router_with_service(service: LedgerService<FixedClock>) -> axum::Router {
    crate::ledger::router::ledger_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
