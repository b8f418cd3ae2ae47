//! Cron expression parsing, next-run simulation and plain-language descriptions.
//!
//! Supports the classic 5-field syntax (minute, hour, day-of-month, month,
//! day-of-week) with `*`, `*/n`, `a/n`, `a-b`, `a-b/n` and comma lists.
//! Day-of-week uses `0` for Sunday. All five fields must match for a minute
//! to be scheduled.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the forward simulation: 366 days of minutes.
pub const MAX_LOOKAHEAD_MINUTES: usize = 527_040;

const DOW_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A labelled, commonly used expression.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub expression: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset { label: "Every minute", expression: "* * * * *" },
    Preset { label: "Every hour", expression: "0 * * * *" },
    Preset { label: "Every day midnight", expression: "0 0 * * *" },
    Preset { label: "Every day noon", expression: "0 12 * * *" },
    Preset { label: "Every weekday 9am", expression: "0 9 * * 1-5" },
    Preset { label: "Every Sunday", expression: "0 0 * * 0" },
    Preset { label: "Every Monday", expression: "0 0 * * 1" },
    Preset { label: "1st of month", expression: "0 0 1 * *" },
    Preset { label: "Every 5 minutes", expression: "*/5 * * * *" },
    Preset { label: "Every 15 minutes", expression: "*/15 * * * *" },
    Preset { label: "Every 2 hours", expression: "0 */2 * * *" },
    Preset { label: "Once a year", expression: "0 0 1 1 *" },
];

/// The five positional fields of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    /// Inclusive legal range of the field.
    pub fn range(self) -> (u8, u8) {
        match self {
            Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::DayOfMonth => (1, 31),
            Field::Month => (1, 12),
            Field::DayOfWeek => (0, 6),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day-of-month",
            Field::Month => "month",
            Field::DayOfWeek => "day-of-week",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Field::Minute => "0-59",
            Field::Hour => "0-23",
            Field::DayOfMonth => "1-31",
            Field::Month => "1-12",
            Field::DayOfWeek => "0-6, Sunday=0",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CronError {
    #[error("A cron expression must have exactly 5 fields separated by spaces.")]
    FieldCount(usize),

    #[error("Invalid {} field (valid: {})", .field.label(), .field.hint())]
    InvalidField { field: Field, value: String },
}

/// Set of allowed values for one field, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u64);

impl FieldSet {
    pub fn contains(self, value: u32) -> bool {
        value < 64 && self.0 & (1u64 << value) != 0
    }

    pub fn values(self) -> Vec<u8> {
        (0u8..64).filter(|v| self.contains(u32::from(*v))).collect()
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn insert(&mut self, value: u8) {
        self.0 |= 1u64 << value;
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values())
    }
}

/// A parsed, validated cron expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// The expression with fields separated by single spaces.
    pub expression: String,
    pub minutes: FieldSet,
    pub hours: FieldSet,
    pub days_of_month: FieldSet,
    pub months: FieldSet,
    pub days_of_week: FieldSet,
}

impl Schedule {
    /// Whether the given minute satisfies every field.
    pub fn matches(&self, at: &NaiveDateTime) -> bool {
        self.months.contains(at.month())
            && self.days_of_month.contains(at.day())
            && self.days_of_week.contains(at.weekday().num_days_from_sunday())
            && self.hours.contains(at.hour())
            && self.minutes.contains(at.minute())
    }

    pub fn field(&self, field: Field) -> FieldSet {
        match field {
            Field::Minute => self.minutes,
            Field::Hour => self.hours,
            Field::DayOfMonth => self.days_of_month,
            Field::Month => self.months,
            Field::DayOfWeek => self.days_of_week,
        }
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn split_fields(expr: &str) -> Result<[&str; 5], CronError> {
    let parts: Vec<&str> = expr.split_whitespace().collect();
    match parts.as_slice() {
        [m, h, dom, mon, dow] => Ok([*m, *h, *dom, *mon, *dow]),
        other => Err(CronError::FieldCount(other.len())),
    }
}

fn parse_number(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse a single field into its value set.
pub fn parse_field(text: &str, field: Field) -> Result<FieldSet, CronError> {
    let invalid = || CronError::InvalidField {
        field,
        value: text.to_string(),
    };
    let (min, max) = field.range();
    let mut set = FieldSet::default();

    for part in text.split(',') {
        let (range_part, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step = parse_number(step).filter(|s| *s > 0).ok_or_else(invalid)?;
                (range, Some(step))
            }
            None => (part, None),
        };

        let (start, end) = if range_part == "*" {
            (min, max)
        } else if let Some((a, b)) = range_part.split_once('-') {
            let a = parse_number(a).ok_or_else(invalid)?;
            let b = parse_number(b).ok_or_else(invalid)?;
            (a, b)
        } else {
            let a = parse_number(range_part).ok_or_else(invalid)?;
            // `a/n` runs from a to the end of the range
            (a, if step.is_some() { max } else { a })
        };

        if start < min || end > max || start > end {
            return Err(invalid());
        }

        let step = usize::from(step.unwrap_or(1));
        for value in (start..=end).step_by(step) {
            set.insert(value);
        }
    }

    if set.is_empty() {
        return Err(invalid());
    }

    Ok(set)
}

/// Parse and validate a 5-field cron expression.
pub fn parse(expr: &str) -> Result<Schedule, CronError> {
    let fields = split_fields(expr)?;

    Ok(Schedule {
        expression: fields.join(" "),
        minutes: parse_field(fields[0], Field::Minute)?,
        hours: parse_field(fields[1], Field::Hour)?,
        days_of_month: parse_field(fields[2], Field::DayOfMonth)?,
        months: parse_field(fields[3], Field::Month)?,
        days_of_week: parse_field(fields[4], Field::DayOfWeek)?,
    })
}

/// Return the validation message for an expression, if it is invalid.
pub fn validate(expr: &str) -> Option<String> {
    parse(expr).err().map(|e| e.to_string())
}

/// Simulate forward minute by minute, starting at the minute after `from`.
///
/// Stops after `count` matches, after [`MAX_LOOKAHEAD_MINUTES`] candidates, or
/// at the last representable minute, whichever comes first.
pub fn next_runs(schedule: &Schedule, from: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
    let step = Duration::minutes(1);
    let truncated = from
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(from);
    let mut cursor = truncated.checked_add_signed(step);
    let mut runs = Vec::with_capacity(count.min(64));

    for _ in 0..MAX_LOOKAHEAD_MINUTES {
        let Some(at) = cursor else { break };
        if runs.len() >= count {
            break;
        }
        if schedule.matches(&at) {
            runs.push(at);
        }
        cursor = at.checked_add_signed(step);
    }

    runs
}

fn known_description(expr: &str) -> Option<&'static str> {
    let description = match expr {
        "* * * * *" => "Every minute",
        "0 * * * *" => "Every hour, at the start of the hour",
        "0 0 * * *" => "Every day at midnight (00:00)",
        "0 12 * * *" => "Every day at noon (12:00)",
        "0 0 * * 0" => "Every Sunday at midnight",
        "0 0 * * 1" => "Every Monday at midnight",
        "0 9 * * 1-5" => "Every weekday (Mon-Fri) at 9:00 AM",
        "0 0 1 * *" => "First day of every month at midnight",
        "0 0 1 1 *" => "Once a year on January 1st at midnight",
        "*/5 * * * *" => "Every 5 minutes",
        "*/15 * * * *" => "Every 15 minutes",
        "0 */2 * * *" => "Every 2 hours, at the start of the hour",
        _ => return None,
    };
    Some(description)
}

fn is_plain_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn name_list(field: &str, names: &[&str]) -> String {
    field
        .split(',')
        .map(|item| {
            item.parse::<usize>()
                .ok()
                .and_then(|i| names.get(i))
                .filter(|name| !name.is_empty())
                .map(|name| name.to_string())
                .unwrap_or_else(|| item.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_time(minute: &str, hour: &str) -> Option<String> {
    if minute == "*" && hour == "*" {
        return Some("every minute".to_string());
    }
    if let Some(step) = minute.strip_prefix("*/") {
        return Some(format!("every {step} minutes"));
    }
    if let Some(step) = hour.strip_prefix("*/") {
        return Some(format!("every {step} hours at minute {minute}"));
    }
    if hour != "*" && !hour.contains(|c| matches!(c, ',' | '-' | '/')) {
        if is_plain_number(hour) && is_plain_number(minute) {
            let h: u32 = hour.parse().ok()?;
            let m: u32 = minute.parse().ok()?;
            let meridiem = if h >= 12 { "PM" } else { "AM" };
            let h12 = if h % 12 == 0 { 12 } else { h % 12 };
            return Some(format!("at {h12}:{m:02} {meridiem}"));
        }
        return Some(format!("at hour {hour}, minute {minute}"));
    }
    if minute != "*" {
        return Some(format!("at minute {minute}"));
    }
    None
}

/// Best-effort plain-language description of a valid expression.
pub fn describe(expr: &str) -> Result<String, CronError> {
    let schedule = parse(expr)?;
    if let Some(known) = known_description(&schedule.expression) {
        return Ok(known.to_string());
    }

    let [minute, hour, dom, month, dow] = split_fields(&schedule.expression)?;
    let mut parts: Vec<String> = Vec::new();

    if let Some(time) = describe_time(minute, hour) {
        parts.push(time);
    }

    if dow != "*" {
        match dow {
            "1-5" => parts.push("on weekdays (Mon-Fri)".to_string()),
            "0,6" | "6,0" => parts.push("on weekends".to_string()),
            _ => parts.push(format!("on {}", name_list(dow, &DOW_NAMES))),
        }
    }

    if month != "*" {
        parts.push(format!("in {}", name_list(month, &MONTH_NAMES)));
    }

    // Only mention the day of month when the weekday is unrestricted.
    if dom != "*" && dow == "*" {
        parts.push(format!("on day {dom} of the month"));
    }

    if parts.is_empty() {
        return Ok(schedule.expression);
    }

    let joined = parts.join(", ");
    let mut chars = joined.chars();
    Ok(match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => joined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    // ============================================================================
    // parse_field tests
    // ============================================================================

    #[test]
    fn test_parse_field_wildcard_covers_range() {
        let set = parse_field("*", Field::Hour).unwrap();
        assert_eq!(set.values(), (0..=23).collect::<Vec<u8>>());
    }

    #[test]
    fn test_parse_field_step_from_wildcard() {
        let set = parse_field("*/5", Field::Minute).unwrap();
        assert_eq!(
            set.values(),
            vec![0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55]
        );
    }

    #[test]
    fn test_parse_field_step_from_start() {
        let set = parse_field("10/20", Field::Minute).unwrap();
        assert_eq!(set.values(), vec![10, 30, 50]);
    }

    #[test]
    fn test_parse_field_stepped_range() {
        let set = parse_field("1-10/3", Field::DayOfMonth).unwrap();
        assert_eq!(set.values(), vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_parse_field_range_and_list() {
        let set = parse_field("1-3,5,0", Field::DayOfWeek).unwrap();
        assert_eq!(set.values(), vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_parse_field_rejects_out_of_range() {
        let err = parse_field("24", Field::Hour).unwrap_err();
        assert_eq!(err.to_string(), "Invalid hour field (valid: 0-23)");

        assert!(parse_field("0", Field::DayOfMonth).is_err());
        assert!(parse_field("13", Field::Month).is_err());
        assert!(parse_field("7", Field::DayOfWeek).is_err());
        assert!(parse_field("60", Field::Minute).is_err());
    }

    #[test]
    fn test_parse_field_rejects_malformed() {
        for bad in ["", "a", "1-", "-1", "5-1", "*/0", "*/x", "1,,2", "1.5", "999"] {
            assert!(
                parse_field(bad, Field::Minute).is_err(),
                "expected {bad:?} to be rejected"
            );
        }
    }

    // ============================================================================
    // parse / validate tests
    // ============================================================================

    #[test]
    fn test_parse_requires_five_fields() {
        assert_eq!(parse("* * * *").unwrap_err(), CronError::FieldCount(4));
        assert_eq!(parse("* * * * * *").unwrap_err(), CronError::FieldCount(6));
        assert_eq!(parse("").unwrap_err(), CronError::FieldCount(0));
    }

    #[test]
    fn test_parse_normalizes_whitespace() {
        let schedule = parse("  0   9 * *\t1-5 ").unwrap();
        assert_eq!(schedule.expression, "0 9 * * 1-5");
    }

    #[test]
    fn test_validate_reports_first_bad_field() {
        assert_eq!(validate("0 9 * * 1-5"), None);
        assert_eq!(
            validate("0 9 32 * *").unwrap(),
            "Invalid day-of-month field (valid: 1-31)"
        );
        assert_eq!(
            validate("0 9 * * 8").unwrap(),
            "Invalid day-of-week field (valid: 0-6, Sunday=0)"
        );
    }

    #[test]
    fn test_from_str_parses() {
        let schedule: Schedule = "*/15 * * * *".parse().unwrap();
        assert_eq!(schedule.minutes.len(), 4);
    }

    // ============================================================================
    // matches / next_runs tests
    // ============================================================================

    #[test]
    fn test_matches_weekday_morning() {
        let schedule = parse("0 9 * * 1-5").unwrap();
        // 2024-01-01 is a Monday
        assert!(schedule.matches(&at(2024, 1, 1, 9, 0)));
        assert!(!schedule.matches(&at(2024, 1, 1, 9, 1)));
        // 2024-01-06 is a Saturday
        assert!(!schedule.matches(&at(2024, 1, 6, 9, 0)));
    }

    #[test]
    fn test_next_runs_starts_after_from() {
        let schedule = parse("* * * * *").unwrap();
        let from = at(2024, 1, 1, 10, 30) + Duration::seconds(42);
        let runs = next_runs(&schedule, from, 3);
        assert_eq!(
            runs,
            vec![
                at(2024, 1, 1, 10, 31),
                at(2024, 1, 1, 10, 32),
                at(2024, 1, 1, 10, 33)
            ]
        );
    }

    #[test]
    fn test_next_runs_weekdays() {
        let schedule = parse("0 9 * * 1-5").unwrap();
        // Friday 2024-01-05 at 10:00
        let runs = next_runs(&schedule, at(2024, 1, 5, 10, 0), 2);
        assert_eq!(runs, vec![at(2024, 1, 8, 9, 0), at(2024, 1, 9, 9, 0)]);
    }

    #[test]
    fn test_next_runs_crosses_year() {
        let schedule = parse("0 0 1 1 *").unwrap();
        let runs = next_runs(&schedule, at(2024, 6, 1, 0, 0), 1);
        assert_eq!(runs, vec![at(2025, 1, 1, 0, 0)]);
    }

    #[test]
    fn test_next_runs_impossible_date_is_empty() {
        // February 31st never happens
        let schedule = parse("0 0 31 2 *").unwrap();
        assert!(next_runs(&schedule, at(2024, 1, 1, 0, 0), 5).is_empty());
    }

    #[test]
    fn test_next_runs_leap_day_within_lookahead() {
        let schedule = parse("0 12 29 2 *").unwrap();
        let runs = next_runs(&schedule, at(2024, 1, 1, 0, 0), 1);
        assert_eq!(runs, vec![at(2024, 2, 29, 12, 0)]);
    }

    #[test]
    fn test_next_runs_zero_count() {
        let schedule = parse("* * * * *").unwrap();
        assert!(next_runs(&schedule, at(2024, 1, 1, 0, 0), 0).is_empty());
    }

    #[test]
    fn test_next_runs_stops_at_last_representable_minute() {
        let schedule = parse("* * * * *").unwrap();
        assert!(next_runs(&schedule, NaiveDateTime::MAX, 1).is_empty());

        let from = NaiveDateTime::MAX - Duration::minutes(3);
        let runs = next_runs(&schedule, from, 5);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs.last().unwrap().minute(), 59);
    }

    #[test]
    fn test_next_runs_day_of_month_and_weekday_both_required() {
        // Friday the 13th only: neither every 13th nor every Friday
        let schedule = parse("0 0 13 * 5").unwrap();
        assert!(!schedule.matches(&at(2024, 1, 13, 0, 0))); // Saturday the 13th
        assert!(!schedule.matches(&at(2024, 9, 6, 0, 0))); // Friday the 6th

        let runs = next_runs(&schedule, at(2024, 1, 1, 0, 0), 5);
        assert_eq!(runs, vec![at(2024, 9, 13, 0, 0), at(2024, 12, 13, 0, 0)]);
        for run in &runs {
            assert_eq!(run.day(), 13);
            assert_eq!(run.weekday(), chrono::Weekday::Fri);
        }
    }

    // ============================================================================
    // describe tests
    // ============================================================================

    #[test]
    fn test_describe_known_expressions() {
        assert_eq!(describe("* * * * *").unwrap(), "Every minute");
        assert_eq!(
            describe("0 9 * * 1-5").unwrap(),
            "Every weekday (Mon-Fri) at 9:00 AM"
        );
        assert_eq!(describe("*/15  * * * *").unwrap(), "Every 15 minutes");
    }

    #[test]
    fn test_describe_every_n_minutes() {
        assert_eq!(describe("*/10 * * * 1").unwrap(), "Every 10 minutes, on Monday");
    }

    #[test]
    fn test_describe_hour_step() {
        assert_eq!(describe("30 */3 * * *").unwrap(), "Every 3 hours at minute 30");
    }

    #[test]
    fn test_describe_clock_time() {
        assert_eq!(describe("5 14 * * *").unwrap(), "At 2:05 PM");
        assert_eq!(describe("0 0 * * 6,0").unwrap(), "At 12:00 AM, on weekends");
    }

    #[test]
    fn test_describe_months_and_day_of_month() {
        assert_eq!(
            describe("0 8 15 1,7 *").unwrap(),
            "At 8:00 AM, in January, July, on day 15 of the month"
        );
    }

    #[test]
    fn test_describe_day_of_month_hidden_when_weekday_set() {
        assert_eq!(describe("0 8 15 * 2").unwrap(), "At 8:00 AM, on Tuesday");
    }

    #[test]
    fn test_describe_minute_only() {
        assert_eq!(describe("15 * * * *").unwrap(), "At minute 15");
    }

    #[test]
    fn test_describe_hour_range() {
        assert_eq!(describe("0 9-17 * * *").unwrap(), "At minute 0");
    }

    #[test]
    fn test_describe_invalid_is_error() {
        assert!(describe("61 * * * *").is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in PRESETS {
            assert!(parse(preset.expression).is_ok(), "{}", preset.label);
        }
    }

    // ============================================================================
    // property tests
    // ============================================================================

    proptest! {
        #[test]
        fn prop_minute_step_matches_multiples(step in 1u8..60) {
            let set = parse_field(&format!("*/{step}"), Field::Minute).unwrap();
            let expected: Vec<u8> = (0..60).step_by(usize::from(step)).collect();
            prop_assert_eq!(set.values(), expected);
        }

        #[test]
        fn prop_hour_range_validation(hour in 0u8..100) {
            let result = parse(&format!("0 {hour} * * *"));
            prop_assert_eq!(result.is_ok(), hour < 24);
        }

        #[test]
        fn prop_next_runs_deterministic_and_matching(
            minute in 0u8..60,
            hour in 0u8..24,
            offset in 0i64..(60 * 24 * 30),
        ) {
            let schedule = parse(&format!("{minute} {hour} * * *")).unwrap();
            let from = at(2024, 3, 1, 0, 0) + Duration::minutes(offset);
            let first = next_runs(&schedule, from, 3);
            let second = next_runs(&schedule, from, 3);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 3);
            prop_assert!(first[0] > from);
            for pair in first.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for run in &first {
                prop_assert!(schedule.matches(run));
            }
        }
    }
}
