//! Calendar arithmetic for the scheduler.
//!
//! Everything here works on calendar days. Timestamps are reduced to their
//! date before they are compared, so two values on the same day are equal no
//! matter what time of day they carry.

use chrono::{Datelike, NaiveDate, Weekday};

/// Saturday and Sunday. Might depend on locale, fixed to the Gregorian weekend here.
pub fn is_weekend_day(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Build a date, `None` for impossible combinations
pub fn date_from_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The calendar date of any date-bearing value, `None` when its year is
/// outside what `NaiveDate` can represent
pub fn calendar_day<D: Datelike>(t: &D) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(t.year(), t.month(), t.day())
}

/// `YYYY-MM-DD`, used as a map key for same-day lookups
pub fn canonical_date_string<D: Datelike>(t: &D) -> String {
    format!("{:04}-{:02}-{:02}", t.year(), t.month(), t.day())
}

/// True when both values fall on the same calendar day
pub fn date_equal<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Every calendar day from the earlier to the later argument, both included,
/// in ascending order.
///
/// Empty when either argument has no [`calendar_day`].
pub fn contiguous_dates<A: Datelike, B: Datelike>(d1: &A, d2: &B) -> Vec<NaiveDate> {
    let (Some(mut start), Some(mut end)) = (calendar_day(d1), calendar_day(d2)) else {
        return Vec::new();
    };
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Whether `date` falls in the same month of the same year as `reference`
pub fn same_month<A: Datelike, B: Datelike>(date: &A, reference: &B) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone, Utc};

    fn evening(year: i32, month: u32, day: u32) -> NaiveDateTime {
        date_from_ymd(year, month, day)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_is_weekend_day() {
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            assert!(!is_weekend_day(day), "{:?} is a weekday", day);
        }
        assert!(is_weekend_day(Weekday::Sat));
        assert!(is_weekend_day(Weekday::Sun));
    }

    #[test]
    fn test_canonical_date_string() {
        assert_eq!(canonical_date_string(&date_from_ymd(2017, 3, 12).unwrap()), "2017-03-12");
        assert_eq!(canonical_date_string(&date_from_ymd(2000, 1, 1).unwrap()), "2000-01-01");
        assert_eq!(canonical_date_string(&date_from_ymd(1999, 12, 31).unwrap()), "1999-12-31");
        assert_eq!(canonical_date_string(&evening(2009, 11, 10)), "2009-11-10");

        let with_zone = Utc.with_ymd_and_hms(2020, 2, 22, 23, 59, 59).unwrap();
        assert_eq!(canonical_date_string(&with_zone), "2020-02-22");
    }

    #[test]
    fn test_date_equal_ignores_time_of_day() {
        let midnight = date_from_ymd(2017, 3, 12).unwrap();
        let late = date_from_ymd(2017, 3, 12).unwrap().and_hms_opt(23, 11, 16).unwrap();
        assert!(date_equal(&midnight, &midnight));
        assert!(date_equal(&midnight, &late));
        assert!(!date_equal(&midnight, &date_from_ymd(2017, 3, 13).unwrap()));
    }

    #[test]
    fn test_date_from_ymd_rejects_impossible_dates() {
        assert!(date_from_ymd(2019, 2, 29).is_none());
        assert!(date_from_ymd(2020, 2, 29).is_some());
    }

    #[test]
    fn test_calendar_day_drops_time_and_zone() {
        let day = date_from_ymd(2020, 2, 22);
        assert_eq!(calendar_day(&evening(2020, 2, 22)), day);
        assert_eq!(calendar_day(&Utc.with_ymd_and_hms(2020, 2, 22, 23, 59, 59).unwrap()), day);
        assert_eq!(calendar_day(&NaiveDate::MAX), Some(NaiveDate::MAX));
        assert_eq!(calendar_day(&NaiveDate::MIN), Some(NaiveDate::MIN));
    }

    #[test]
    fn test_contiguous_dates_same_day() {
        let from = evening(2009, 11, 10);
        let dates = contiguous_dates(&from, &from);
        assert_eq!(dates, vec![date_from_ymd(2009, 11, 10).unwrap()]);
    }

    #[test]
    fn test_contiguous_dates_same_day_different_times() {
        let morning = date_from_ymd(2009, 11, 10).unwrap().and_hms_opt(0, 0, 1).unwrap();
        let dates = contiguous_dates(&morning, &evening(2009, 11, 10));
        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn test_contiguous_dates_order_does_not_matter() {
        let later = evening(2009, 11, 10);
        let earlier = evening(2009, 11, 8);

        let forward = contiguous_dates(&earlier, &later);
        let backward = contiguous_dates(&later, &earlier);

        assert_eq!(forward.len(), 3);
        assert_eq!(forward, backward);
        assert_eq!(forward[0], date_from_ymd(2009, 11, 8).unwrap());
        assert_eq!(forward[2], date_from_ymd(2009, 11, 10).unwrap());
    }

    #[test]
    fn test_contiguous_dates_length_matches_day_difference() {
        let start = date_from_ymd(2019, 12, 20).unwrap();
        for offset in [0_i64, 1, 6, 13, 45] {
            let end = start + chrono::Duration::days(offset);
            assert_eq!(contiguous_dates(&start, &end).len() as i64, offset + 1);
            assert_eq!(contiguous_dates(&end, &start).len() as i64, offset + 1);
        }
    }

    #[test]
    fn test_contiguous_dates_crosses_month_and_leap_day() {
        let dates = contiguous_dates(&evening(2020, 2, 27), &evening(2020, 3, 2));
        let strings: Vec<String> = dates.iter().map(canonical_date_string).collect();
        assert_eq!(
            strings,
            vec!["2020-02-27", "2020-02-28", "2020-02-29", "2020-03-01", "2020-03-02"]
        );
    }

    #[test]
    fn test_same_month() {
        let reset = date_from_ymd(2019, 1, 1).unwrap();
        assert!(same_month(&reset, &date_from_ymd(2019, 1, 31).unwrap()));
        assert!(!same_month(&reset, &date_from_ymd(2019, 2, 1).unwrap()));
        assert!(!same_month(&reset, &date_from_ymd(2020, 1, 1).unwrap()));
    }
}
