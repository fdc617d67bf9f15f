// Countdown - remaining time until the next occurrence of a month/day
//
// Pure date arithmetic over any chrono timezone. The display layer calls
// this once per second with the wall clock; tests call it with fixed UTC
// instants.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone};

/// A non-negative breakdown of the time left until the target instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownSnapshot {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

/// Midnight (local to `now`'s timezone) of the next occurrence of
/// `month`/`day`, counting today's occurrence as "next" until the instant
/// itself has passed.
///
/// The result is always measured from the supplied clock: callers polling a
/// live clock get the usual this-year-or-next answer, while a stale `now`
/// yields an occurrence relative to that stale instant rather than to real
/// time. A Feb 29 target rolls forward to the next year that has one.
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, month: u32, day: u32) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut year = now.year();
    loop {
        if let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, day) {
            let midnight = date.and_time(NaiveTime::MIN);
            if let Some(target) = tz.from_local_datetime(&midnight).earliest() {
                if target >= *now {
                    return target;
                }
            }
        }
        year += 1;
    }
}

/// Time remaining from `now` until the next `month`/`day`, split into whole
/// days, hours, minutes and seconds. Never negative; exactly zero when `now`
/// is the target instant.
pub fn compute_remaining<Tz: TimeZone>(now: &DateTime<Tz>, month: u32, day: u32) -> CountdownSnapshot {
    let target = next_occurrence(now, month, day);
    let total = (target - now.clone()).num_seconds().max(0) as u64;
    CountdownSnapshot {
        days: total / 86_400,
        hours: total % 86_400 / 3_600,
        minutes: total % 3_600 / 60,
        seconds: total % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_target_later_this_year() {
        let now = at("2026-02-10T00:00:00Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 4);
        assert_eq!(snap.hours, 0);
        assert_eq!(snap.minutes, 0);
        assert_eq!(snap.seconds, 0);
    }

    #[test]
    fn test_rolls_to_next_year_when_past() {
        // 2027 is not a leap year: Feb 15 2026 -> Feb 14 2027 is 364 days.
        let now = at("2026-02-15T00:00:00Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 364);
        assert_eq!(snap.hours, 0);
    }

    #[test]
    fn test_exact_target_instant_is_all_zero() {
        let now = at("2026-02-14T00:00:00Z");
        assert_eq!(compute_remaining(&now, 2, 14), CountdownSnapshot::ZERO);
    }

    #[test]
    fn test_one_second_past_target_rolls_over() {
        let now = at("2026-02-14T00:00:01Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 364);
        assert_eq!(snap.hours, 23);
        assert_eq!(snap.minutes, 59);
        assert_eq!(snap.seconds, 59);
    }

    #[test]
    fn test_day_boundary_arithmetic() {
        // One day out minus one second: 0 days, 23:59:59 remain.
        let now = at("2026-02-13T00:00:01Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 0);
        assert_eq!(snap.hours, 23);
        assert_eq!(snap.minutes, 59);
        assert_eq!(snap.seconds, 59);

        // Exactly one day out: a full day, nothing else.
        let now = at("2026-02-13T00:00:00Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 1);
        assert_eq!(snap.hours, 0);
        assert_eq!(snap.seconds, 0);
    }

    #[test]
    fn test_clock_time_portion_counts() {
        let now = at("2026-02-12T18:30:15Z");
        let snap = compute_remaining(&now, 2, 14);
        assert_eq!(snap.days, 1);
        assert_eq!(snap.hours, 5);
        assert_eq!(snap.minutes, 29);
        assert_eq!(snap.seconds, 45);
    }

    #[test]
    fn test_never_negative() {
        for s in [
            "2026-02-14T00:00:00Z",
            "2026-02-14T12:00:00Z",
            "2026-12-31T23:59:59Z",
            "2026-01-01T00:00:00Z",
        ] {
            let snap = compute_remaining(&at(s), 2, 14);
            // Unsigned fields: just confirm the breakdown is in range.
            assert!(snap.hours < 24);
            assert!(snap.minutes < 60);
            assert!(snap.seconds < 60);
        }
    }

    #[test]
    fn test_feb_29_rolls_to_next_leap_year() {
        let now = at("2025-03-01T00:00:00Z");
        let target = next_occurrence(&now, 2, 29);
        assert_eq!(target, at("2028-02-29T00:00:00Z"));
    }

    #[test]
    fn test_next_occurrence_same_day_later_hour() {
        // Past midnight of the target day: this year's occurrence is gone.
        let now = at("2026-11-13T08:00:00Z");
        let target = next_occurrence(&now, 11, 13);
        assert_eq!(target, at("2027-11-13T00:00:00Z"));
    }
}
