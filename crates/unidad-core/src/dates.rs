//! Date helpers used by the services.

use chrono::{Local, NaiveDate};

/// Today's date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole years between `birth` and `on`, counted as elapsed days floor-divided
/// by 365. Leap days are ignored, so the result can run a day or two ahead of
/// a calendar birthday. A birth date after `on` yields a negative age.
pub fn age_in_years(birth: NaiveDate, on: NaiveDate) -> i64 {
    (on - birth).num_days().div_euclid(365)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_same_day_is_zero() {
        assert_eq!(age_in_years(date(2024, 3, 1), date(2024, 3, 1)), 0);
    }

    #[test]
    fn test_age_counts_365_day_years() {
        // 2016 is a leap year: 1826 days
        assert_eq!(age_in_years(date(2015, 1, 1), date(2020, 1, 1)), 5);
        // 1823 days
        assert_eq!(age_in_years(date(2015, 1, 3), date(2019, 12, 31)), 4);
    }

    #[test]
    fn test_age_future_birth_is_negative() {
        assert_eq!(age_in_years(date(2024, 1, 2), date(2024, 1, 1)), -1);
    }
}
