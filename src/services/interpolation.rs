//! Uptime/downtime estimation from sparse polling samples.
//!
//! Polling observations are irregular point samples of a binary signal.
//! This module turns a store's samples, restricted to its business-hour
//! windows, into continuous-time uptime/downtime totals using midpoint
//! interpolation: between two consecutive samples the earlier status is
//! assumed to hold up to the midpoint, and the later status from the
//! midpoint on. A pair of samples is either considered whole or skipped
//! whole; pairs straddling a window bound are not clipped.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};

use crate::models::{BusinessHourWindow, ObservationStatus};

/// One localized status sample. The timestamp is the store's local
/// wall-clock, not UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSample {
    pub timestamp: NaiveDateTime,
    pub status: ObservationStatus,
}

impl StatusSample {
    pub fn new(timestamp: NaiveDateTime, status: ObservationStatus) -> Self {
        Self { timestamp, status }
    }
}

/// Business-hour windows keyed by weekday (Monday = 0). Days absent from
/// the map contribute nothing to the totals.
pub type WeeklyHours = BTreeMap<u8, Vec<BusinessHourWindow>>;

/// Accumulated uptime/downtime, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntervalTotals {
    pub uptime_minutes: f64,
    pub downtime_minutes: f64,
}

impl IntervalTotals {
    fn add(&mut self, status: ObservationStatus, minutes: f64) {
        if status.is_active() {
            self.uptime_minutes += minutes;
        } else {
            self.downtime_minutes += minutes;
        }
    }
}

/// Estimate total uptime and downtime minutes across all supplied
/// business-hour windows.
///
/// Samples may arrive in any order; they are sorted ascending by
/// timestamp internally. For each weekday in `weekly_hours`, samples
/// falling on that weekday are selected and each of the day's windows is
/// processed independently:
///
/// * The window's bounds are anchored on the date of the first sample of
///   that weekday.
/// * Consecutive sample pairs `(t1, s1) -> (t2, s2)` are walked in order.
///   A pair with `t1` before the window start or `t2` after the window
///   end is skipped whole.
/// * For a kept pair, `s1` is credited from a running cursor
///   (initialized to the window start) up to the midpoint of `t1` and
///   `t2`, and the cursor advances to the midpoint.
/// * If the last sample of the day does not exceed the window end, its
///   status is credited from the cursor to the window end.
///
/// A weekday with no samples contributes zero. Overlapping windows on
/// the same day are each processed independently and therefore
/// double-count the overlap.
pub fn interpolate_business_uptime(
    samples: &[StatusSample],
    weekly_hours: &WeeklyHours,
) -> IntervalTotals {
    let mut sorted: Vec<StatusSample> = samples.to_vec();
    sorted.sort_by_key(|s| s.timestamp);

    let mut totals = IntervalTotals::default();

    for (day, windows) in weekly_hours {
        let day_samples: Vec<StatusSample> = sorted
            .iter()
            .copied()
            .filter(|s| weekday_index(s.timestamp) == *day)
            .collect();

        let (first, last) = match (day_samples.first(), day_samples.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => continue,
        };
        let anchor_date = first.timestamp.date();

        for window in windows {
            let window_start = anchor_date.and_time(window.start_time_local);
            let window_end = anchor_date.and_time(window.end_time_local);

            let mut cursor = window_start;
            for pair in day_samples.windows(2) {
                let (t1, s1) = (pair[0].timestamp, pair[0].status);
                let t2 = pair[1].timestamp;
                if t1 < window_start || t2 > window_end {
                    continue;
                }
                let midpoint = t1 + (t2 - t1) / 2;
                totals.add(s1, minutes_between(cursor, midpoint));
                cursor = midpoint;
            }

            if last.timestamp <= window_end {
                totals.add(last.status, minutes_between(cursor, window_end));
            }
        }
    }

    totals
}

/// Weekday index of a local timestamp, Monday = 0.
pub fn weekday_index(ts: NaiveDateTime) -> u8 {
    ts.weekday().num_days_from_monday() as u8
}

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

#[cfg(test)]
#[path = "interpolation_tests.rs"]
mod interpolation_tests;
