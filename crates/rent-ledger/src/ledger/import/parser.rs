use super::super::domain::{PaymentId, PaymentRecord, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

/// Raw CSV row paired with its 1-based data row number.
#[derive(Debug)]
pub(crate) struct CsvPaymentRow {
    pub(crate) row: usize,
    inner: PaymentRow,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CsvPaymentRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<PaymentRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map(|inner| CsvPaymentRow {
                row: index + 1,
                inner,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    #[serde(default)]
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    due_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    paid_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    verified: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

impl CsvPaymentRow {
    pub(crate) fn into_record(self) -> Result<PaymentRecord, ValidationError> {
        let PaymentRow {
            id,
            amount,
            due_date,
            paid_date,
            verified,
            status,
        } = self.inner;
        let payment_id = PaymentId(id.trim().to_string());

        let amount = match amount {
            Some(raw) => Some(parse_amount(&raw).ok_or_else(|| {
                ValidationError::InvalidAmount {
                    payment_id: payment_id.clone(),
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let verified = match verified {
            Some(raw) => Some(parse_flag(&raw).ok_or_else(|| ValidationError::InvalidFlag {
                payment_id: payment_id.clone(),
                field: "verified",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(PaymentRecord {
            id,
            amount,
            due_date,
            paid_date,
            verified,
            is_verified: None,
            status,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts plain decimals with an optional leading pound sign and thousands separators.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('£')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_amount_formats() {
        assert_eq!(parse_amount("850.00"), Some(dec!(850.00)));
        assert_eq!(parse_amount("£1,250.50"), Some(dec!(1250.50)));
        assert_eq!(parse_amount("eight hundred"), None);
    }

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
