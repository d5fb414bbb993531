use crate::models::time::{
    self, format_timestamp, is_within_local_range, localize, parse_timestamp, parse_timezone,
    weekday_of, ReportClock, TimeError,
};
use chrono::NaiveDate;

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn test_parse_timestamp_with_fraction() {
    let parsed = parse_timestamp("2023-01-25 10:05:00.123456").unwrap();
    assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 1, 25).unwrap());
    assert_eq!(format_timestamp(parsed), "2023-01-25 10:05:00.123456");
}

#[test]
fn test_parse_timestamp_without_fraction() {
    let parsed = parse_timestamp("2023-01-25 10:05:00").unwrap();
    assert_eq!(parsed, ts(2023, 1, 25, 10, 5, 0));
}

#[test]
fn test_parse_timestamp_strips_utc_suffix() {
    // Seed data timestamps look like "2023-01-25 10:05:00.123456 UTC".
    let parsed = parse_timestamp("2023-01-25 10:05:00.123456 UTC").unwrap();
    assert_eq!(format_timestamp(parsed), "2023-01-25 10:05:00.123456");
}

#[test]
fn test_parse_timestamp_rejects_garbage() {
    let err = parse_timestamp("not a timestamp").unwrap_err();
    assert!(matches!(err, TimeError::InvalidTimestamp { .. }));
}

#[test]
fn test_format_always_six_fraction_digits() {
    assert_eq!(
        format_timestamp(ts(2023, 1, 25, 4, 0, 0)),
        "2023-01-25 04:00:00.000000"
    );
}

#[test]
fn test_localize_standard_time() {
    // January: America/Chicago is UTC-6.
    let local = localize("2023-01-25 10:00:00.000000", "America/Chicago").unwrap();
    assert_eq!(local, "2023-01-25 04:00:00.000000");
}

#[test]
fn test_localize_daylight_time() {
    // July: America/Chicago is UTC-5.
    let local = localize("2023-07-25 10:00:00.000000", "America/Chicago").unwrap();
    assert_eq!(local, "2023-07-25 05:00:00.000000");
}

#[test]
fn test_localize_crosses_date_boundary() {
    let local = localize("2023-01-25 03:00:00.000000", "America/Chicago").unwrap();
    assert_eq!(local, "2023-01-24 21:00:00.000000");
}

#[test]
fn test_localize_unknown_zone() {
    let err = localize("2023-01-25 10:00:00.000000", "Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, TimeError::InvalidTimezone(_)));
}

#[test]
fn test_parse_timezone_known_zones() {
    assert!(parse_timezone("America/Chicago").is_ok());
    assert!(parse_timezone("Asia/Kolkata").is_ok());
    assert!(parse_timezone("nowhere").is_err());
}

#[test]
fn test_weekday_of_monday_is_zero() {
    // 2023-01-23 was a Monday.
    assert_eq!(weekday_of("2023-01-23 09:00:00.000000").unwrap(), 0);
    assert_eq!(weekday_of("2023-01-25 09:00:00.000000").unwrap(), 2);
    assert_eq!(weekday_of("2023-01-29 09:00:00.000000").unwrap(), 6);
}

#[test]
fn test_is_within_local_range_inclusive_bounds() {
    let inside = "2023-01-25 12:30:00.000000";
    let at_start = "2023-01-25 09:00:00.000000";
    let at_end = "2023-01-25 17:00:00.000000";
    let before = "2023-01-25 08:59:59.000000";

    assert!(is_within_local_range("09:00:00", "17:00:00", inside).unwrap());
    assert!(is_within_local_range("09:00:00", "17:00:00", at_start).unwrap());
    assert!(is_within_local_range("09:00:00", "17:00:00", at_end).unwrap());
    assert!(!is_within_local_range("09:00:00", "17:00:00", before).unwrap());
}

#[test]
fn test_is_within_local_range_fraction_past_end() {
    // A half second past the end bound is outside the inclusive range.
    let just_past = "2023-01-25 17:00:00.500000";
    assert!(!is_within_local_range("09:00:00", "17:00:00", just_past).unwrap());
}

#[test]
fn test_is_within_local_range_bad_bound() {
    let err = is_within_local_range("9am", "17:00:00", "2023-01-25 12:00:00.000000").unwrap_err();
    assert!(matches!(err, TimeError::InvalidTimeOfDay { .. }));
}

#[test]
fn test_fixed_clock_is_deterministic() {
    let pinned = ts(2023, 1, 25, 18, 13, 22);
    let clock = ReportClock::Fixed(pinned);
    assert_eq!(clock.now(), pinned);
    assert_eq!(clock.now(), pinned);
}

#[test]
fn test_default_timezone_is_chicago() {
    assert_eq!(time::DEFAULT_TIMEZONE.name(), "America/Chicago");
}

#[test]
fn test_day_bounds() {
    assert_eq!(time::start_of_day().to_string(), "00:00:00");
    assert_eq!(time::end_of_day().to_string(), "23:59:59");
}
