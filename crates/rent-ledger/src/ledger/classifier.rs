use super::domain::{Payment, PaymentStatus};
use chrono::NaiveDate;

/// Derive the display status of a payment on `today`.
///
/// Rules are checked in priority order. A verified payment is reported as
/// verified even when no paid date was recorded.
pub fn classify(payment: &Payment, today: NaiveDate) -> PaymentStatus {
    if payment.verified {
        return PaymentStatus::Verified;
    }

    if payment.paid_date.is_some() {
        return PaymentStatus::AwaitingVerification;
    }

    if today > payment.due_date {
        PaymentStatus::Overdue
    } else if today == payment.due_date {
        PaymentStatus::DueToday
    } else {
        PaymentStatus::Upcoming
    }
}
