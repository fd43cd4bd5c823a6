use super::super::domain::{Payment, PaymentId, PaymentLifecycle, PaymentStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    pub id: PaymentId,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_late: Option<i64>,
    pub verified: bool,
    pub lifecycle: PaymentLifecycle,
    pub status: PaymentStatus,
    pub status_label: &'static str,
    pub on_time: bool,
}

impl PaymentView {
    pub(crate) fn new(payment: &Payment, status: PaymentStatus, on_time: bool) -> Self {
        Self {
            id: payment.id.clone(),
            amount: payment.amount,
            due_date: payment.due_date,
            paid_date: payment.paid_date,
            days_late: payment.days_late(),
            verified: payment.verified,
            lifecycle: payment.lifecycle.clone(),
            status,
            status_label: status.label(),
            on_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCountEntry {
    pub status: PaymentStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewNoteKind {
    /// Verified without a recorded paid date.
    VerifiedWithoutPaidDate,
    Overdue,
}

impl ReviewNoteKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::VerifiedWithoutPaidDate => "Verified Without Paid Date",
            Self::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewNote {
    pub payment_id: PaymentId,
    pub kind: ReviewNoteKind,
    pub kind_label: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakView {
    pub current: u32,
    pub grace_days: i64,
}
