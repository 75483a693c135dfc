use chrono::{Duration, NaiveDateTime, NaiveTime};

/// ISO-8601 local date-time without offset, e.g. `2026-10-16T08:15:30.123456`.
/// The fraction is omitted when zero.
pub fn format_local_date_time(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Inclusive bounds of the calendar day containing `now`, at the storage precision of one microsecond.
pub fn day_bounds(now: &NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = now.date().and_time(NaiveTime::MIN);
    let end = start + Duration::days(1) - Duration::microseconds(1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_micro_opt(h, m, s, micro).unwrap()
    }

    #[test]
    fn formats_whole_seconds_without_fraction() {
        assert_eq!(format_local_date_time(&at(8, 5, 0, 0)), "2026-10-16T08:05:00");
    }

    #[test]
    fn formats_fractional_seconds() {
        assert_eq!(format_local_date_time(&at(23, 59, 59, 250_000)), "2026-10-16T23:59:59.250");
        assert_eq!(format_local_date_time(&at(0, 0, 1, 7)), "2026-10-16T00:00:01.000007");
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let (start, end) = day_bounds(&at(13, 37, 0, 42));
        assert_eq!(start, at(0, 0, 0, 0));
        assert_eq!(end, at(23, 59, 59, 999_999));
    }
}
