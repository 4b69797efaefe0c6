//! Timestamp parsing and receipt date formats
//!
//! Job payloads carry dates as ISO-8601 strings (with or without offset),
//! plain `YYYY-MM-DD` dates, or Unix milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::printing::{RenderError, Scalar};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a payload date into local time of the business timezone
pub fn parse_timestamp(value: &Scalar, tz: Tz) -> Result<NaiveDateTime, RenderError> {
    let invalid = || RenderError::InvalidDate(value.to_string());

    let raw = match value {
        Scalar::Number(ms) => {
            let utc = DateTime::from_timestamp_millis(*ms as i64).ok_or_else(invalid)?;
            return Ok(utc.with_timezone(&tz).naive_local());
        }
        Scalar::Text(s) => s.trim(),
        Scalar::Bool(_) => return Err(invalid()),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).ok_or_else(invalid);
    }
    if let Ok(ms) = raw.parse::<i64>() {
        let utc = DateTime::from_timestamp_millis(ms).ok_or_else(invalid)?;
        return Ok(utc.with_timezone(&tz).naive_local());
    }
    Err(invalid())
}

/// Current local time in the business timezone
pub fn now_local(tz: Tz) -> NaiveDateTime {
    tz.from_utc_datetime(&Utc::now().naive_utc()).naive_local()
}

/// Invoice timestamp: `DD-MM-YYYY hh:mm AM`
pub fn format_invoice_time(dt: &NaiveDateTime) -> String {
    dt.format("%d-%m-%Y %I:%M %p").to_string()
}

/// Expense row date: `DD-MM`
pub fn format_day_month(dt: &NaiveDateTime) -> String {
    dt.format("%d-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IST: Tz = chrono_tz::Asia::Kolkata;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn test_rfc3339_is_shifted_to_business_timezone() {
        let dt = parse_timestamp(&text("2024-03-05T08:30:00Z"), IST).unwrap();
        assert_eq!(format_invoice_time(&dt), "05-03-2024 02:00 PM");
    }

    #[test]
    fn test_naive_datetime_is_kept() {
        let dt = parse_timestamp(&text("2024-12-31T23:05:00"), IST).unwrap();
        assert_eq!(format_invoice_time(&dt), "31-12-2024 11:05 PM");
    }

    #[test]
    fn test_plain_date() {
        let dt = parse_timestamp(&text("2024-07-09"), IST).unwrap();
        assert_eq!(format_day_month(&dt), "09-07");
        assert_eq!(format_invoice_time(&dt), "09-07-2024 12:00 AM");
    }

    #[test]
    fn test_unix_millis() {
        // 2024-01-22 08:32:15 UTC
        let dt = parse_timestamp(&Scalar::Number(1705912335000.0), IST).unwrap();
        assert_eq!(format_invoice_time(&dt), "22-01-2024 02:02 PM");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            parse_timestamp(&text("yesterday"), IST),
            Err(RenderError::InvalidDate(_))
        ));
    }
}
