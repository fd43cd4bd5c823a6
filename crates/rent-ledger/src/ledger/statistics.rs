use super::classifier::classify;
use super::domain::{Payment, PaymentStatus, Property};
use super::score::{ScoreInputs, VERIFICATION_MAX};
use super::streak::is_on_time;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Rent-to-income bands as (maximum ratio, points).
const RENT_TO_INCOME_BANDS: [(f64, f64); 3] = [(0.30, 200.0), (0.40, 150.0), (0.50, 100.0)];
const RENT_TO_INCOME_FLOOR: f64 = 50.0;

/// Summary counts over a tenant's payment history on a given day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentStatistics {
    pub total: usize,
    pub paid: usize,
    pub on_time: usize,
    pub verified: usize,
    pub status_counts: HashMap<PaymentStatus, usize>,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
}

impl PaymentStatistics {
    pub fn from_payments(payments: &[Payment], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: payments.len(),
            ..Self::default()
        };

        for payment in payments {
            let status = classify(payment, today);
            *stats.status_counts.entry(status).or_default() += 1;

            if payment.verified {
                stats.verified += 1;
            }

            if payment.paid_date.is_some() {
                stats.paid += 1;
                stats.total_paid += payment.amount;
                if is_on_time(payment) {
                    stats.on_time += 1;
                }
            } else if status.is_outstanding() {
                stats.total_outstanding += payment.amount;
            }
        }

        stats
    }

    pub fn count(&self, status: PaymentStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    /// Share of paid payments that landed inside the grace window, 0-100.
    pub fn on_time_percentage(&self) -> Option<f64> {
        if self.paid == 0 {
            return None;
        }
        Some(self.on_time as f64 * 100.0 / self.paid as f64)
    }

    /// Verified share of all payments, pre-scaled to the verification weight.
    pub fn verification_score(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.verified as f64 * VERIFICATION_MAX / self.total as f64)
    }

    pub fn score_inputs(&self, rent_to_income_score: Option<f64>) -> ScoreInputs {
        ScoreInputs {
            on_time_percentage: self.on_time_percentage(),
            verification_score: self.verification_score(),
            rent_to_income_score,
        }
    }
}

/// Combined monthly rent across the tenant's properties.
///
/// Unknown when there are no properties or any property has no rent on record.
pub fn monthly_rent(properties: &[Property]) -> Option<Decimal> {
    if properties.is_empty() {
        return None;
    }
    properties.iter().map(|property| property.monthly_rent).sum()
}

/// Rent as a share of income, or `None` when either side is unknown or not positive.
pub fn rent_to_income_ratio(
    monthly_rent: Option<Decimal>,
    monthly_income: Option<Decimal>,
) -> Option<f64> {
    let rent = monthly_rent.filter(|rent| *rent > Decimal::ZERO)?;
    let income = monthly_income.filter(|income| *income > Decimal::ZERO)?;
    (rent / income).to_f64()
}

/// Pre-scaled rent-to-income sub-score (0-200) for the aggregator.
pub fn rent_to_income_score(
    monthly_rent: Option<Decimal>,
    monthly_income: Option<Decimal>,
) -> Option<f64> {
    let ratio = rent_to_income_ratio(monthly_rent, monthly_income)?;
    let points = RENT_TO_INCOME_BANDS
        .iter()
        .find(|(max_ratio, _)| ratio <= *max_ratio)
        .map(|(_, points)| *points)
        .unwrap_or(RENT_TO_INCOME_FLOOR);
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::domain::{PaymentId, PaymentLifecycle, PropertyId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn payment(
        id: &str,
        amount: Decimal,
        due: NaiveDate,
        paid: Option<NaiveDate>,
        verified: bool,
    ) -> Payment {
        Payment {
            id: PaymentId(id.to_string()),
            amount,
            due_date: due,
            paid_date: paid,
            verified,
            lifecycle: PaymentLifecycle::Pending,
        }
    }

    #[test]
    fn summarises_history() {
        let today = date(2024, 4, 1);
        let payments = vec![
            payment("jan", dec!(900), date(2024, 1, 1), Some(date(2024, 1, 10)), true),
            payment("feb", dec!(900), date(2024, 2, 1), Some(date(2024, 2, 1)), true),
            payment("mar", dec!(900), date(2024, 3, 1), Some(date(2024, 3, 2)), false),
            payment("apr", dec!(900), date(2024, 4, 1), None, false),
            payment("may", dec!(900), date(2024, 5, 1), None, false),
        ];

        let stats = PaymentStatistics::from_payments(&payments, today);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.paid, 3);
        assert_eq!(stats.on_time, 2);
        assert_eq!(stats.verified, 2);
        assert_eq!(stats.count(PaymentStatus::Verified), 2);
        assert_eq!(stats.count(PaymentStatus::AwaitingVerification), 1);
        assert_eq!(stats.count(PaymentStatus::DueToday), 1);
        assert_eq!(stats.count(PaymentStatus::Upcoming), 1);
        assert_eq!(stats.count(PaymentStatus::Overdue), 0);
        assert_eq!(stats.total_paid, dec!(2700));
        assert_eq!(stats.total_outstanding, dec!(900));
        assert_eq!(stats.verification_score(), Some(80.0));
        let on_time = stats.on_time_percentage().expect("paid payments exist");
        assert!((on_time - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_history_has_no_ratios() {
        let stats = PaymentStatistics::from_payments(&[], date(2024, 4, 1));
        assert_eq!(stats.on_time_percentage(), None);
        assert_eq!(stats.verification_score(), None);
        assert_eq!(stats.score_inputs(None), ScoreInputs::default());
    }

    #[test]
    fn rent_to_income_bands() {
        let rent = Some(dec!(900));
        assert_eq!(rent_to_income_score(rent, Some(dec!(3000))), Some(200.0));
        assert_eq!(rent_to_income_score(rent, Some(dec!(2400))), Some(150.0));
        assert_eq!(rent_to_income_score(rent, Some(dec!(1800))), Some(100.0));
        assert_eq!(rent_to_income_score(rent, Some(dec!(1000))), Some(50.0));
        assert_eq!(rent_to_income_score(rent, Some(Decimal::ZERO)), None);
        assert_eq!(rent_to_income_score(rent, None), None);
    }

    #[test]
    fn unknown_or_zero_rent_has_no_ratio() {
        assert_eq!(rent_to_income_ratio(None, Some(dec!(3000))), None);
        assert_eq!(rent_to_income_ratio(Some(Decimal::ZERO), Some(dec!(3000))), None);
        assert_eq!(rent_to_income_score(None, Some(dec!(3000))), None);
        assert_eq!(monthly_rent(&[]), None);
    }

    #[test]
    fn sums_rent_across_properties() {
        let properties = vec![
            Property {
                id: PropertyId("a".to_string()),
                address: "Flat 1".to_string(),
                monthly_rent: Some(dec!(650.50)),
                tenancy_start: None,
            },
            Property {
                id: PropertyId("b".to_string()),
                address: "Garage 4".to_string(),
                monthly_rent: Some(dec!(49.50)),
                tenancy_start: None,
            },
        ];
        assert_eq!(monthly_rent(&properties), Some(dec!(700)));
    }

    #[test]
    fn property_without_rent_makes_total_unknown() {
        let properties = vec![
            Property {
                id: PropertyId("a".to_string()),
                address: "Flat 1".to_string(),
                monthly_rent: Some(dec!(650)),
                tenancy_start: None,
            },
            Property {
                id: PropertyId("b".to_string()),
                address: "Flat 2".to_string(),
                monthly_rent: None,
                tenancy_start: None,
            },
        ];
        assert_eq!(monthly_rent(&properties), None);
    }
}
