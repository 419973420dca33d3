//! Pure date/time predicates shared by the services. No I/O here.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Clock-ins after this time-of-day count as late.
pub fn late_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

/// Two inclusive date ranges [a_start, a_end] and [b_start, b_end] overlap
/// iff a_start <= b_end and a_end >= b_start.
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Whether `time` falls inside the shift window [start, end].
///
/// start >= end means the window wraps past midnight (e.g. 22:00-06:00), so
/// containment holds on either side of the wrap.
pub fn time_within_window(start: NaiveTime, end: NaiveTime, time: NaiveTime) -> bool {
    if start < end {
        time >= start && time <= end
    } else {
        time >= start || time <= end
    }
}

/// Elapsed hours between two clock events, unrounded.
pub fn hours_between(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> f64 {
    (clock_out - clock_in).num_seconds() as f64 / 3600.0
}

pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// A clock-in is late when its time-of-day is strictly after the 09:00 cutoff.
pub fn is_late(clock_in: DateTime<Utc>) -> bool {
    clock_in.time() > late_cutoff()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, m, s).unwrap()
    }

    #[test]
    fn overlapping_and_disjoint_date_ranges() {
        // Shared middle
        assert!(date_ranges_overlap(
            d("2024-01-10"),
            d("2024-01-20"),
            d("2024-01-15"),
            d("2024-01-25")
        ));
        // Touching endpoints still overlap (inclusive ranges)
        assert!(date_ranges_overlap(
            d("2024-01-10"),
            d("2024-01-20"),
            d("2024-01-20"),
            d("2024-01-25")
        ));
        // One range inside the other
        assert!(date_ranges_overlap(
            d("2024-01-01"),
            d("2024-01-31"),
            d("2024-01-10"),
            d("2024-01-12")
        ));
        assert!(!date_ranges_overlap(
            d("2024-01-10"),
            d("2024-01-20"),
            d("2024-01-21"),
            d("2024-01-25")
        ));
    }

    #[test]
    fn day_window_containment() {
        let start = t(9, 0);
        let end = t(17, 0);
        assert!(!time_within_window(start, end, t(8, 59)));
        assert!(time_within_window(start, end, t(9, 0)));
        assert!(time_within_window(start, end, t(17, 0)));
        assert!(!time_within_window(
            start,
            end,
            NaiveTime::from_hms_opt(17, 1, 0).unwrap()
        ));
    }

    #[test]
    fn overnight_window_containment() {
        let start = t(22, 0);
        let end = t(6, 0);
        assert!(time_within_window(start, end, t(23, 0)));
        assert!(time_within_window(start, end, t(5, 0)));
        assert!(!time_within_window(start, end, t(12, 0)));
        // Boundaries of the wrap
        assert!(time_within_window(start, end, t(22, 0)));
        assert!(time_within_window(start, end, t(6, 0)));
    }

    #[test]
    fn hours_between_clock_events() {
        let worked = hours_between(at(9, 0, 0), at(17, 30, 0));
        assert!((worked - 8.5).abs() < 1e-9);
        assert_eq!(round_hours(hours_between(at(9, 0, 0), at(17, 20, 0))), 8.33);
    }

    #[test]
    fn lateness_boundary() {
        assert!(!is_late(at(9, 0, 0)));
        assert!(is_late(at(9, 0, 1)));
        assert!(is_late(at(14, 45, 0)));
        assert!(!is_late(at(8, 59, 59)));
    }
}
