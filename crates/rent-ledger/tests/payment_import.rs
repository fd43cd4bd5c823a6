use chrono::NaiveDate;
use chrono_tz::Europe::London;
use rent_ledger::ledger::{
    compute_streak, LedgerReport, PaymentCsvImporter, PaymentStatus, ReportInputs,
};
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/tenant_payments.csv")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn importer_reads_fixture_from_disk() {
    let payments = PaymentCsvImporter::from_path(fixture_path(), London).expect("fixture imports");

    assert_eq!(payments.len(), 7);
    assert_eq!(payments[0].amount, dec!(1050.00));
    assert_eq!(payments[0].days_late(), Some(-3));
    assert_eq!(payments[4].paid_date, Some(date(2024, 2, 2)));
    assert!(!payments[4].verified);
    assert!(payments[5].paid_date.is_none());
}

#[test]
fn imported_history_streak_stops_at_unpaid_month() {
    let data = include_bytes!("../fixtures/tenant_payments.csv");
    let payments = PaymentCsvImporter::from_reader(&data[..], London).expect("fixture imports");

    // April and March are unpaid, so nothing counts yet.
    assert_eq!(compute_streak(&payments), 0);

    let settled: Vec<_> = payments
        .into_iter()
        .filter(|payment| payment.paid_date.is_some())
        .collect();
    // Feb, Jan (exactly five days late) and Dec count; Nov was eight days late.
    assert_eq!(compute_streak(&settled), 3);
}

#[test]
fn imported_history_builds_report() {
    let payments =
        PaymentCsvImporter::from_path(fixture_path(), London).expect("fixture imports");
    let inputs = ReportInputs {
        payments,
        properties: Vec::new(),
        monthly_income: Some(dec!(3000)),
        monthly_rent: Some(dec!(1050)),
    };

    let report = LedgerReport::build(&inputs, date(2024, 3, 15));

    assert_eq!(report.count(PaymentStatus::Verified), 4);
    assert_eq!(report.count(PaymentStatus::AwaitingVerification), 1);
    assert_eq!(report.count(PaymentStatus::Overdue), 1);
    assert_eq!(report.count(PaymentStatus::Upcoming), 1);
    assert_eq!(report.total_paid, dec!(5250));
    assert_eq!(report.total_outstanding, dec!(1050));
    // 4 of 5 paid on time (480), 4 of 7 verified (114.29), ratio 0.35 (150).
    assert_eq!(report.score.total, 744);
    assert!(report.score.total <= rent_ledger::ledger::MAX_SCORE);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = PaymentCsvImporter::from_path("does/not/exist.csv", London)
        .expect_err("missing file rejected");
    assert!(matches!(err, rent_ledger::ledger::PaymentImportError::Io(_)));
}
