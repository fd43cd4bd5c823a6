use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::classify;
use super::dates::Clock;
use super::domain::{
    validate_payments, validate_properties, PaymentRecord, PropertyRecord, ValidationError,
};
use super::report::views::{PaymentView, StreakView};
use super::report::{LedgerReport, ReportInputs};
use super::score::{compute_score, ScoreBreakdown, ScoreInputs};
use super::streak::{compute_streak, is_on_time, most_recent_first, ON_TIME_GRACE_DAYS};
use crate::config::LedgerConfig;

/// Payload for classifying a batch of payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub today: NaiveDate,
    pub payments: Vec<PaymentView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakRequest {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

/// Payload for a full tenant report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Validates incoming records and runs the ledger computations against them.
pub struct LedgerService<C> {
    config: LedgerConfig,
    clock: Arc<C>,
}

impl<C> LedgerService<C>
where
    C: Clock + 'static,
{
    pub fn new(config: LedgerConfig, clock: Arc<C>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The requested evaluation date, or today according to the clock.
    pub fn today(&self, requested: Option<NaiveDate>) -> NaiveDate {
        requested.unwrap_or_else(|| self.clock.today())
    }

    pub fn classify(&self, request: ClassifyRequest) -> Result<ClassifyResponse, ValidationError> {
        let today = self.today(request.today);
        let mut payments = validate_payments(request.payments, self.config.timezone)?;
        payments.sort_by(most_recent_first);

        let payments = payments
            .iter()
            .map(|payment| PaymentView::new(payment, classify(payment, today), is_on_time(payment)))
            .collect();

        Ok(ClassifyResponse { today, payments })
    }

    pub fn streak(&self, request: StreakRequest) -> Result<StreakView, ValidationError> {
        let payments = validate_payments(request.payments, self.config.timezone)?;
        Ok(StreakView {
            current: compute_streak(&payments),
            grace_days: ON_TIME_GRACE_DAYS,
        })
    }

    pub fn score(&self, inputs: ScoreInputs) -> ScoreBreakdown {
        compute_score(inputs)
    }

    pub fn report(&self, request: ReportRequest) -> Result<LedgerReport, ValidationError> {
        let ReportRequest {
            payments,
            properties,
            monthly_income,
            monthly_rent,
            today,
        } = request;

        let today = self.today(today);
        let inputs = ReportInputs {
            payments: validate_payments(payments, self.config.timezone)?,
            properties: validate_properties(properties, self.config.timezone)?,
            monthly_income,
            monthly_rent,
        };

        let report = LedgerReport::build(&inputs, today);
        debug!(
            %today,
            payments = report.payments.len(),
            streak = report.streak.current,
            score = report.score.total,
            "built ledger report"
        );
        Ok(report)
    }
}
