//! Unix timestamps and human-readable dates.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Cannot parse `{0}` as a timestamp or date")]
    Unparseable(String),

    #[error("Timestamp `{0}` is out of range")]
    OutOfRange(String),

    #[error("Invalid UTC offset `{0}` (expected UTC, Z or ±HH:MM)")]
    InvalidOffset(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampOutput {
    pub unix_sec: i64,
    pub unix_ms: i64,
    pub iso: String,
    pub utc: String,
    pub offset: String,
    pub local: String,
    pub date: String,
    pub time: String,
    pub relative: String,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// An integer is read as seconds, or milliseconds when longer than 10 digits.
/// Dates without an offset are taken as UTC.
pub fn parse_input(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let text = input.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let out_of_range = || TimestampError::OutOfRange(text.to_string());
        let n: i64 = text.parse().map_err(|_| out_of_range())?;
        let instant = if digits.len() > 10 {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
        return instant.ok_or_else(out_of_range);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::Unparseable(text.to_string()))
}

/// `UTC`, `Z`, `+05:30`, `-0800` or `+5`.
pub fn parse_offset(tz: &str) -> Result<FixedOffset, TimestampError> {
    let text = tz.trim();
    let invalid = || TimestampError::InvalidOffset(text.to_string());

    let upper = text.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    if rest.is_empty() || rest == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, body) = if let Some(body) = rest.strip_prefix('+') {
        (1, body)
    } else if let Some(body) = rest.strip_prefix('-') {
        (-1, body)
    } else {
        return Err(invalid());
    };
    if !body.is_ascii() {
        return Err(invalid());
    }
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None if body.len() == 4 => body.split_at(2),
        None => (body, "0"),
    };

    let number = |s: &str| -> Option<i32> {
        (!s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit()))
            .then(|| s.parse().ok())
            .flatten()
    };
    let hours = number(hours).filter(|h| *h <= 23).ok_or_else(invalid)?;
    let minutes = number(minutes).filter(|m| *m <= 59).ok_or_else(invalid)?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

pub fn offset_label(offset: FixedOffset) -> String {
    if offset.local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        offset.to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// "3 hours ago", "in 2 days", "just now".
pub fn relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = instant.signed_duration_since(now).num_seconds();
    let seconds = delta.abs();

    let amount = match seconds {
        0 => return "just now".to_string(),
        1..=59 => plural(seconds, "second"),
        60..=3_599 => plural(seconds / 60, "minute"),
        3_600..=86_399 => plural(seconds / 3_600, "hour"),
        86_400..=2_591_999 => plural(seconds / 86_400, "day"),
        2_592_000..=31_535_999 => plural(seconds / 2_592_000, "month"),
        _ => plural(seconds / 31_536_000, "year"),
    };

    if delta > 0 {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}

pub fn convert(instant: DateTime<Utc>, offset: FixedOffset, now: DateTime<Utc>) -> TimestampOutput {
    let local = instant.with_timezone(&offset);
    TimestampOutput {
        unix_sec: instant.timestamp(),
        unix_ms: instant.timestamp_millis(),
        iso: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        utc: instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        offset: offset_label(offset),
        local: local.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        date: local.format("%-m/%-d/%Y").to_string(),
        time: local.format("%-I:%M:%S %p").to_string(),
        relative: relative(instant, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    // ============================================================================
    // parse_input tests
    // ============================================================================

    #[test]
    fn test_parse_seconds_and_millis() {
        assert_eq!(parse_input("1700000000").unwrap(), utc(2023, 11, 14, 22, 13, 20));
        assert_eq!(parse_input("1700000000000").unwrap(), utc(2023, 11, 14, 22, 13, 20));
        assert_eq!(parse_input("0").unwrap(), utc(1970, 1, 1, 0, 0, 0));
        assert_eq!(parse_input("-86400").unwrap(), utc(1969, 12, 31, 0, 0, 0));
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            parse_input("2024-03-10T12:30:00+02:00").unwrap(),
            utc(2024, 3, 10, 10, 30, 0)
        );
        assert_eq!(parse_input("2024-03-10 12:30").unwrap(), utc(2024, 3, 10, 12, 30, 0));
        assert_eq!(parse_input("2024-03-10T08:00:05").unwrap(), utc(2024, 3, 10, 8, 0, 5));
        assert_eq!(parse_input("2024-03-10").unwrap(), utc(2024, 3, 10, 0, 0, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_input("yesterday"), Err(TimestampError::Unparseable(_))));
        assert!(matches!(parse_input(""), Err(TimestampError::Unparseable(_))));
        assert!(matches!(
            parse_input("99999999999999999999"),
            Err(TimestampError::OutOfRange(_))
        ));
    }

    // ============================================================================
    // parse_offset tests
    // ============================================================================

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("UTC").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_offset("-0800").unwrap().local_minus_utc(), -28_800);
        assert_eq!(parse_offset("UTC+9").unwrap().local_minus_utc(), 32_400);
    }

    #[test]
    fn test_parse_offset_errors() {
        for bad in ["Europe/Paris", "+25:00", "+05:60", "5", "+"] {
            assert!(parse_offset(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_parse_offset_rejects_multibyte_body() {
        for bad in ["+aé1", "-é12", "UTC+１２", "+0é"] {
            assert!(matches!(
                parse_offset(bad),
                Err(TimestampError::InvalidOffset(_))
            ));
        }
    }

    // ============================================================================
    // relative tests
    // ============================================================================

    #[test]
    fn test_relative() {
        let now = utc(2024, 6, 1, 12, 0, 0);
        assert_eq!(relative(now, now), "just now");
        assert_eq!(relative(utc(2024, 6, 1, 11, 59, 59), now), "1 second ago");
        assert_eq!(relative(utc(2024, 6, 1, 9, 0, 0), now), "3 hours ago");
        assert_eq!(relative(utc(2024, 6, 3, 12, 0, 0), now), "in 2 days");
        assert_eq!(relative(utc(2024, 8, 1, 12, 0, 0), now), "in 2 months");
        assert_eq!(relative(utc(2021, 6, 1, 12, 0, 0), now), "3 years ago");
    }

    // ============================================================================
    // convert tests
    // ============================================================================

    #[test]
    fn test_convert_utc() {
        let instant = utc(2024, 1, 1, 0, 0, 0);
        let output = convert(instant, parse_offset("UTC").unwrap(), utc(2024, 1, 1, 1, 0, 0));
        assert_eq!(output.unix_sec, 1_704_067_200);
        assert_eq!(output.unix_ms, 1_704_067_200_000);
        assert_eq!(output.iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(output.utc, "Mon, 01 Jan 2024 00:00:00 GMT");
        assert_eq!(output.offset, "UTC");
        assert_eq!(output.local, "1/1/2024, 12:00:00 AM");
        assert_eq!(output.date, "1/1/2024");
        assert_eq!(output.time, "12:00:00 AM");
        assert_eq!(output.relative, "1 hour ago");
    }

    #[test]
    fn test_convert_with_offset() {
        let instant = utc(2024, 1, 1, 20, 15, 0);
        let output = convert(instant, parse_offset("+05:30").unwrap(), instant);
        assert_eq!(output.offset, "+05:30");
        assert_eq!(output.local, "1/2/2024, 1:45:00 AM");
        assert_eq!(output.relative, "just now");
    }
}
