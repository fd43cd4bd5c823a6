use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rent_ledger::config::LedgerConfig;
use rent_ledger::ledger::{LedgerService, SystemClock};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn ledger_service(config: LedgerConfig) -> LedgerService<SystemClock> {
    LedgerService::new(config, Arc::new(SystemClock::new(config.timezone)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("amount '{raw}' must not be negative"));
    }
    Ok(amount)
}
