//! HTTP route handlers.

pub mod availability;
pub mod health;
pub mod metrics;
pub mod orders;

use domain::InMemoryBookingService;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub booking_service: InMemoryBookingService,
}

/// Serde helpers for calendar days in requests.
pub(crate) mod day {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer};

    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, which is truncated to
    /// its UTC day.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        raw.parse::<NaiveDate>().ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{raw}', expected YYYY-MM-DD or RFC 3339"
            ))
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn plain_dates_and_timestamps() {
            let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
            assert_eq!(parse("2024-01-02"), expected);
            assert_eq!(parse("2024-01-02T00:00:00Z"), expected);
            assert_eq!(parse("2024-01-02T01:30:00+03:00"), NaiveDate::from_ymd_opt(2024, 1, 1));
            assert_eq!(parse("02/01/2024"), None);
        }
    }
}
