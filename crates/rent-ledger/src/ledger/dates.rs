use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar day.
///
/// Timestamps are converted into `timezone` before the time of day is dropped,
/// so `2024-03-31T23:30:00Z` lands on April 1st in `Europe/London`.
pub fn parse_calendar_day(raw: &str, timezone: Tz) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&timezone).date_naive());
    }

    None
}

/// Source of "today" for classification.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock resolved to a calendar day in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America, Europe};

    #[test]
    fn parses_plain_dates_without_timezone_shift() {
        let date = parse_calendar_day("2024-01-06", America::Los_Angeles).expect("parse date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }

    #[test]
    fn timestamps_resolve_in_canonical_timezone() {
        // 23:30 UTC on 31 March is 00:30 BST on 1 April.
        let london = parse_calendar_day("2024-03-31T23:30:00Z", Europe::London).expect("parse");
        assert_eq!(london, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        let new_york =
            parse_calendar_day("2024-03-31T23:30:00Z", America::New_York).expect("parse");
        assert_eq!(new_york, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_calendar_day("", Europe::London).is_none());
        assert!(parse_calendar_day("next tuesday", Europe::London).is_none());
        assert!(parse_calendar_day("2024-02-30", Europe::London).is_none());
    }

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
