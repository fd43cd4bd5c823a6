use super::common::*;
use crate::ledger::domain::{PaymentStatus, PropertyRecord, ValidationError};
use crate::ledger::report::views::ReviewNoteKind;
use crate::ledger::score::ScoreInputs;
use crate::ledger::service::{ClassifyRequest, ReportRequest, StreakRequest};
use crate::config::LedgerConfig;
use chrono_tz::Europe::London;
use rust_decimal_macros::dec;

#[test]
fn service_carries_configured_timezone() {
    let service = service();
    assert_eq!(service.config(), &LedgerConfig::default());
    assert_eq!(service.config().timezone, London);
}

#[test]
fn classify_defaults_to_clock_date_and_sorts_recent_first() {
    let service = service();
    let mut payments = quarter_history();
    payments.reverse();
    payments.push(record("pay-today", "2024-03-10", None, false));
    payments.push(record("pay-next", "2024-04-01", None, false));

    let response = service
        .classify(ClassifyRequest {
            payments,
            today: None,
        })
        .expect("classification succeeds");

    assert_eq!(response.today, today());
    let ids: Vec<&str> = response.payments.iter().map(|view| view.id.0.as_str()).collect();
    assert_eq!(
        ids,
        vec!["pay-next", "pay-today", "pay-mar", "pay-feb", "pay-jan"]
    );
    let statuses: Vec<PaymentStatus> = response.payments.iter().map(|view| view.status).collect();
    assert_eq!(
        statuses,
        vec![
            PaymentStatus::Upcoming,
            PaymentStatus::DueToday,
            PaymentStatus::Verified,
            PaymentStatus::Verified,
            PaymentStatus::Overdue,
        ]
    );
}

#[test]
fn classify_honours_requested_date() {
    let service = service();
    let response = service
        .classify(ClassifyRequest {
            payments: vec![record("pay-jan", "2024-01-01", None, false)],
            today: Some(date(2023, 12, 31)),
        })
        .expect("classification succeeds");

    assert_eq!(response.payments[0].status, PaymentStatus::Upcoming);
}

#[test]
fn classify_rejects_missing_due_date() {
    let service = service();
    let mut broken = record("pay-x", "2024-01-01", None, false);
    broken.due_date = None;

    let err = service
        .classify(ClassifyRequest {
            payments: vec![broken],
            today: None,
        })
        .expect_err("missing due date rejected");

    assert!(matches!(
        err,
        ValidationError::MissingField {
            field: "dueDate",
            ..
        }
    ));
}

#[test]
fn streak_reports_grace_window() {
    let service = service();
    let streak = service
        .streak(StreakRequest {
            payments: quarter_history(),
        })
        .expect("streak computes");

    assert_eq!(streak.current, 2);
    assert_eq!(streak.grace_days, 5);
}

#[test]
fn score_passes_through_aggregator() {
    let service = service();
    let score = service.score(ScoreInputs {
        on_time_percentage: Some(100.0),
        verification_score: Some(150.0),
        rent_to_income_score: None,
    });
    assert_eq!(score.total, 750);
}

#[test]
fn report_combines_history_properties_and_income() {
    let service = service();
    let report = service
        .report(ReportRequest {
            payments: quarter_history(),
            properties: vec![PropertyRecord {
                id: "prop-1".to_string(),
                address: "12 Mill Lane, Leeds".to_string(),
                monthly_rent: Some(dec!(950)),
                tenancy_start_date: Some("2023-12-15".to_string()),
            }],
            monthly_income: Some(dec!(3800)),
            monthly_rent: None,
            today: None,
        })
        .expect("report builds");

    assert_eq!(report.today, today());
    assert_eq!(report.streak.current, 2);
    assert_eq!(report.count(PaymentStatus::Verified), 2);
    assert_eq!(report.count(PaymentStatus::Overdue), 1);
    assert_eq!(report.total_paid, dec!(1900));
    assert_eq!(report.total_outstanding, dec!(950));
    assert_eq!(report.monthly_rent, Some(dec!(950)));
    assert_eq!(report.rent_to_income_ratio, Some(0.25));
    // 100% on time (600) + 2/3 verified (133.33) + ratio 0.25 (200)
    assert_eq!(report.score.total, 933);
    assert!(report
        .review_notes
        .iter()
        .any(|note| note.kind == ReviewNoteKind::Overdue && note.payment_id.0 == "pay-jan"));
}

#[test]
fn report_without_known_rent_scores_no_rent_to_income_points() {
    let service = service();
    let report = service
        .report(ReportRequest {
            payments: quarter_history(),
            monthly_income: Some(dec!(3000)),
            ..ReportRequest::default()
        })
        .expect("report builds");

    assert_eq!(report.monthly_rent, None);
    assert_eq!(report.rent_to_income_ratio, None);
    assert_eq!(report.score.rent_to_income.points, 0.0);
    // 100% on time (600) + 2/3 verified (133.33)
    assert_eq!(report.score.total, 733);

    let with_unpriced_property = service
        .report(ReportRequest {
            payments: quarter_history(),
            properties: vec![PropertyRecord {
                id: "prop-2".to_string(),
                address: "4 Quay Street, Bristol".to_string(),
                monthly_rent: None,
                tenancy_start_date: None,
            }],
            monthly_income: Some(dec!(3000)),
            ..ReportRequest::default()
        })
        .expect("report builds");

    assert_eq!(with_unpriced_property.rent_to_income_ratio, None);
    assert_eq!(with_unpriced_property.score.total, 733);
}

#[test]
fn report_flags_verified_payments_without_paid_date() {
    let service = service();
    let report = service
        .report(ReportRequest {
            payments: vec![record("pay-odd", "2024-02-01", None, true)],
            ..ReportRequest::default()
        })
        .expect("report builds");

    assert_eq!(report.count(PaymentStatus::Verified), 1);
    assert_eq!(report.streak.current, 0);
    assert_eq!(
        report.review_notes[0].kind,
        ReviewNoteKind::VerifiedWithoutPaidDate
    );
    assert_eq!(report.rent_to_income_ratio, None);
}
