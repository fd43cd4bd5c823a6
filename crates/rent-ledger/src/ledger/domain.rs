use super::dates::parse_calendar_day;
use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a payment as issued by the payments API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub String);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier for a property as issued by the properties API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

/// Coarse lifecycle tag supplied by the API. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentLifecycle {
    #[default]
    Pending,
    Paid,
    #[serde(untagged)]
    Other(String),
}

impl PaymentLifecycle {
    pub fn from_tag(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Self::Pending,
            "paid" => Self::Paid,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

/// Fine-grained status derived from a payment and the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Verified,
    AwaitingVerification,
    Overdue,
    DueToday,
    Upcoming,
}

impl PaymentStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Overdue,
            Self::DueToday,
            Self::Upcoming,
            Self::AwaitingVerification,
            Self::Verified,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::AwaitingVerification => "Awaiting Verification",
            Self::Overdue => "Overdue",
            Self::DueToday => "Due Today",
            Self::Upcoming => "Upcoming",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::AwaitingVerification => "awaiting-verification",
            Self::Overdue => "overdue",
            Self::DueToday => "due-today",
            Self::Upcoming => "upcoming",
        }
    }

    /// Unpaid statuses that count towards the outstanding balance.
    pub const fn is_outstanding(self) -> bool {
        matches!(self, Self::Overdue | Self::DueToday)
    }
}

/// Payment as delivered by `GET /api/payments`, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Validated payment with calendar-day dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub verified: bool,
    pub lifecycle: PaymentLifecycle,
}

impl Payment {
    /// Validate a raw record, converting timestamps to days in `timezone`.
    pub fn from_record(record: PaymentRecord, timezone: Tz) -> Result<Self, ValidationError> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingField {
                payment_id: None,
                field: "id",
            });
        }
        let payment_id = PaymentId(id.to_string());

        let amount = record.amount.unwrap_or(Decimal::ZERO);
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeAmount {
                payment_id: payment_id.clone(),
                amount,
            });
        }

        let due_raw = record
            .due_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingField {
                payment_id: Some(payment_id.clone()),
                field: "dueDate",
            })?;
        let due_date = parse_calendar_day(due_raw, timezone).ok_or_else(|| {
            ValidationError::InvalidDate {
                payment_id: payment_id.clone(),
                field: "dueDate",
                value: due_raw.to_string(),
            }
        })?;

        let paid_date = match record
            .paid_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
        {
            Some(raw) => Some(parse_calendar_day(raw, timezone).ok_or_else(|| {
                ValidationError::InvalidDate {
                    payment_id: payment_id.clone(),
                    field: "paidDate",
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        let verified = record.verified.unwrap_or(false) || record.is_verified.unwrap_or(false);
        let lifecycle = record
            .status
            .as_deref()
            .map(PaymentLifecycle::from_tag)
            .unwrap_or_default();

        Ok(Self {
            id: payment_id,
            amount,
            due_date,
            paid_date,
            verified,
            lifecycle,
        })
    }

    /// Days between the paid date and the due date; negative when paid early.
    pub fn days_late(&self) -> Option<i64> {
        self.paid_date
            .map(|paid| paid.signed_duration_since(self.due_date).num_days())
    }
}

/// Property as delivered by `GET /api/properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    #[serde(default)]
    pub tenancy_start_date: Option<String>,
}

/// Display context and rent input for the rent-to-income ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    /// `None` when the record carried no rent.
    pub monthly_rent: Option<Decimal>,
    pub tenancy_start: Option<NaiveDate>,
}

impl Property {
    pub fn from_record(record: PropertyRecord, timezone: Tz) -> Result<Self, ValidationError> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingPropertyField { field: "id" });
        }

        let monthly_rent = record.monthly_rent;
        let negative = monthly_rent.filter(|rent| rent.is_sign_negative() && !rent.is_zero());
        if let Some(amount) = negative {
            return Err(ValidationError::NegativeRent {
                property_id: id.to_string(),
                amount,
            });
        }

        let tenancy_start = match record
            .tenancy_start_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
        {
            Some(raw) => Some(parse_calendar_day(raw, timezone).ok_or_else(|| {
                ValidationError::InvalidPropertyDate {
                    property_id: id.to_string(),
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            id: PropertyId(id.to_string()),
            address: record.address.trim().to_string(),
            monthly_rent,
            tenancy_start,
        })
    }
}

/// Validate a batch of payment records, failing on the first bad record.
pub fn validate_payments(
    records: Vec<PaymentRecord>,
    timezone: Tz,
) -> Result<Vec<Payment>, ValidationError> {
    records
        .into_iter()
        .map(|record| Payment::from_record(record, timezone))
        .collect()
}

pub fn validate_properties(
    records: Vec<PropertyRecord>,
    timezone: Tz,
) -> Result<Vec<Property>, ValidationError> {
    records
        .into_iter()
        .map(|record| Property::from_record(record, timezone))
        .collect()
}

/// Raised when a record cannot be turned into a trustworthy domain value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("payment {} is missing required field {field}", display_id(.payment_id))]
    MissingField {
        payment_id: Option<PaymentId>,
        field: &'static str,
    },
    #[error("payment {payment_id} has unparsable {field} '{value}'")]
    InvalidDate {
        payment_id: PaymentId,
        field: &'static str,
        value: String,
    },
    #[error("payment {payment_id} has negative amount {amount}")]
    NegativeAmount { payment_id: PaymentId, amount: Decimal },
    #[error("payment {payment_id} has unparsable amount '{value}'")]
    InvalidAmount { payment_id: PaymentId, value: String },
    #[error("payment {payment_id} has unparsable {field} flag '{value}'")]
    InvalidFlag {
        payment_id: PaymentId,
        field: &'static str,
        value: String,
    },
    #[error("property is missing required field {field}")]
    MissingPropertyField { field: &'static str },
    #[error("property {property_id} has unparsable tenancy start '{value}'")]
    InvalidPropertyDate { property_id: String, value: String },
    #[error("property {property_id} has negative monthly rent {amount}")]
    NegativeRent { property_id: String, amount: Decimal },
}

fn display_id(id: &Option<PaymentId>) -> String {
    match id {
        Some(id) => id.0.clone(),
        None => "<unknown>".to_string(),
    }
}
