use super::super::classifier::classify;
use super::super::domain::{Payment, PaymentStatus, Property};
use super::super::score::{compute_score, ScoreBreakdown};
use super::super::statistics::{
    monthly_rent, rent_to_income_ratio, rent_to_income_score, PaymentStatistics,
};
use super::super::streak::{compute_streak, is_on_time, most_recent_first, ON_TIME_GRACE_DAYS};
use super::views::{PaymentView, ReviewNote, ReviewNoteKind, StatusCountEntry, StreakView};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Validated data a tenant report is computed from.
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub payments: Vec<Payment>,
    pub properties: Vec<Property>,
    pub monthly_income: Option<Decimal>,
    /// Used instead of the property rents when set.
    pub monthly_rent: Option<Decimal>,
}

/// Everything the tenant dashboard shows for one evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    pub today: NaiveDate,
    pub payments: Vec<PaymentView>,
    pub status_counts: Vec<StatusCountEntry>,
    pub streak: StreakView,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_time_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_to_income_ratio: Option<f64>,
    pub score: ScoreBreakdown,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub review_notes: Vec<ReviewNote>,
}

impl LedgerReport {
    pub fn build(inputs: &ReportInputs, today: NaiveDate) -> Self {
        let mut ordered: Vec<&Payment> = inputs.payments.iter().collect();
        ordered.sort_by(|a, b| most_recent_first(a, b));

        let mut payments = Vec::with_capacity(ordered.len());
        let mut review_notes = Vec::new();
        for payment in ordered {
            let status = classify(payment, today);

            if status == PaymentStatus::Verified && payment.paid_date.is_none() {
                review_notes.push(ReviewNote {
                    payment_id: payment.id.clone(),
                    kind: ReviewNoteKind::VerifiedWithoutPaidDate,
                    kind_label: ReviewNoteKind::VerifiedWithoutPaidDate.label(),
                    detail: format!(
                        "payment due {} is verified but has no paid date",
                        payment.due_date
                    ),
                });
            } else if status == PaymentStatus::Overdue {
                let days = today.signed_duration_since(payment.due_date).num_days();
                review_notes.push(ReviewNote {
                    payment_id: payment.id.clone(),
                    kind: ReviewNoteKind::Overdue,
                    kind_label: ReviewNoteKind::Overdue.label(),
                    detail: format!(
                        "{} due {} is {} day(s) overdue",
                        payment.amount, payment.due_date, days
                    ),
                });
            }

            payments.push(PaymentView::new(payment, status, is_on_time(payment)));
        }

        let statistics = PaymentStatistics::from_payments(&inputs.payments, today);
        let status_counts = PaymentStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: statistics.count(status),
            })
            .collect();

        let rent = inputs
            .monthly_rent
            .or_else(|| monthly_rent(&inputs.properties));
        let ratio = rent_to_income_ratio(rent, inputs.monthly_income);
        let score = compute_score(
            statistics.score_inputs(rent_to_income_score(rent, inputs.monthly_income)),
        );

        Self {
            today,
            payments,
            status_counts,
            streak: StreakView {
                current: compute_streak(&inputs.payments),
                grace_days: ON_TIME_GRACE_DAYS,
            },
            total_paid: statistics.total_paid,
            total_outstanding: statistics.total_outstanding,
            on_time_percentage: statistics.on_time_percentage(),
            monthly_rent: rent,
            rent_to_income_ratio: ratio,
            score,
            review_notes,
        }
    }

    pub fn count(&self, status: PaymentStatus) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
