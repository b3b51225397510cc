use std::fmt;

use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::error::RangeError;

/// First year offered by the year selector.
pub const MIN_DISPLAY_YEAR: i32 = 1900;
/// Last year offered by the year selector.
pub const MAX_DISPLAY_YEAR: i32 = 2100;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month. `month0` is zero-based (0 = January).
///
/// # Panics
///
/// Panics if `month0 > 11`.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 if is_leap_year(year) => 29,
        m => DAYS_IN_MONTH[m as usize],
    }
}

/// Saturday and Sunday are weekends. Not configurable.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !is_weekend(date)
}

/// Day of week of the 1st of the month, counted from Sunday (0) to Saturday (6).
/// This is the number of padding cells before day 1 in a Sunday-first grid.
///
/// # Panics
///
/// Panics if `month0 > 11`.
pub fn month_start_offset(year: i32, month0: u32) -> u32 {
    // Sakamoto's method, valid for any proleptic Gregorian year.
    // Widened so no i32 year can overflow.
    const T: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let year = i64::from(year);
    let y = if month0 < 2 { year - 1 } else { year };
    let raw = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + T[month0 as usize] + 1;
    raw.rem_euclid(7) as u32
}

fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    // `iter_days` stops at NaiveDate::MAX, and an inverted span yields nothing.
    start.iter_days().take_while(move |d| *d <= end)
}

/// Returns all weekend days (Sat/Sun) in the inclusive date range [start, end], ascending.
pub fn weekend_dates_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    days_between(start, end).filter(|d| is_weekend(*d)).collect()
}

/// Returns all weekdays (Mon-Fri) in the inclusive date range [start, end], ascending.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    days_between(start, end).filter(|d| is_weekday(*d)).collect()
}

/// Earliest year chrono can represent.
pub fn min_supported_year() -> i32 {
    NaiveDate::MIN.year()
}

/// Latest year chrono can represent.
pub fn max_supported_year() -> i32 {
    NaiveDate::MAX.year()
}

/// A calendar month within chrono's representable years. The month index is
/// zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    pub fn new(year: i32, month0: u32) -> Result<Self, RangeError> {
        if month0 > 11 {
            return Err(RangeError::InvalidMonth(month0));
        }
        if !(min_supported_year()..=max_supported_year()).contains(&year) {
            return Err(RangeError::UnsupportedYear(year));
        }
        Ok(Self { year, month0 })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month0(self) -> u32 {
        self.month0
    }

    /// Same month in another year.
    pub fn with_year(self, year: i32) -> Self {
        Self { year, ..self }
    }

    pub fn month(self) -> Month {
        MONTHS[self.month0 as usize]
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    pub fn start_offset(self) -> u32 {
        month_start_offset(self.year, self.month0)
    }

    /// The 1st of the month. Always `Some` for a validated month.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month().name(), self.year)
    }
}

/// Shift a month by `delta` months, rolling the year over in either direction.
/// Saturates at the first and last month chrono can represent.
pub fn adjust_month(current: YearMonth, delta: i32) -> YearMonth {
    let first = i64::from(min_supported_year()) * 12;
    let last = i64::from(max_supported_year()) * 12 + 11;
    let index = (i64::from(current.year) * 12 + i64::from(current.month0) + i64::from(delta))
        .clamp(first, last);
    YearMonth {
        // In range after the clamp.
        year: index.div_euclid(12) as i32,
        month0: index.rem_euclid(12) as u32,
    }
}

/// A year that the year selector offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayYear(i32);

impl DisplayYear {
    pub fn new(year: i32) -> Result<Self, RangeError> {
        if (MIN_DISPLAY_YEAR..=MAX_DISPLAY_YEAR).contains(&year) {
            Ok(Self(year))
        } else {
            Err(RangeError::YearOutOfRange(year))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Every selectable year, ascending.
    pub fn options() -> impl Iterator<Item = DisplayYear> {
        (MIN_DISPLAY_YEAR..=MAX_DISPLAY_YEAR).map(DisplayYear)
    }
}

impl TryFrom<i32> for DisplayYear {
    type Error = RangeError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(year: i32, month0: u32) -> YearMonth {
        YearMonth::new(year, month0).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_length() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn month_lengths_match_chrono() {
        for year in [1999, 2000, 2023, 2024] {
            for month0 in 0..12 {
                let first = date(year, month0 + 1, 1);
                let next = YearMonth::of(first);
                let next = adjust_month(next, 1).first_day().unwrap();
                assert_eq!(
                    days_in_month(year, month0) as i64,
                    (next - first).num_days(),
                    "{year}-{month0}"
                );
            }
        }
    }

    #[test]
    fn weekend_classification() {
        assert!(is_weekend(date(2025, 1, 18))); // Sat
        assert!(is_weekend(date(2025, 1, 19))); // Sun
        assert!(!is_weekend(date(2025, 1, 17))); // Fri
        assert!(is_weekday(date(2025, 1, 13))); // Mon
    }

    #[test]
    fn month_start_offsets() {
        assert_eq!(month_start_offset(2024, 0), 1); // Mon Jan 1, 2024
        assert_eq!(month_start_offset(2024, 8), 0); // Sun Sep 1, 2024
        assert_eq!(month_start_offset(2025, 1), 6); // Sat Feb 1, 2025
        assert_eq!(month_start_offset(2000, 1), 2); // Tue Feb 1, 2000
    }

    #[test]
    fn month_start_offset_matches_chrono() {
        for year in [1900, 1970, 2024, 2100] {
            for month0 in 0..12 {
                let expected = date(year, month0 + 1, 1).weekday().num_days_from_sunday();
                assert_eq!(month_start_offset(year, month0), expected, "{year}-{month0}");
            }
        }
    }

    #[test]
    fn weekends_in_single_week() {
        // Mon Jan 13 through Sun Jan 19, 2025
        let result = weekend_dates_between(date(2025, 1, 13), date(2025, 1, 19));
        assert_eq!(result, vec![date(2025, 1, 18), date(2025, 1, 19)]);
    }

    #[test]
    fn weekends_single_day() {
        assert!(weekend_dates_between(date(2025, 1, 15), date(2025, 1, 15)).is_empty());
        assert_eq!(
            weekend_dates_between(date(2025, 1, 18), date(2025, 1, 18)),
            vec![date(2025, 1, 18)]
        );
    }

    #[test]
    fn weekends_start_after_end() {
        let result = weekend_dates_between(date(2025, 1, 20), date(2025, 1, 15));
        assert!(result.is_empty());
    }

    #[test]
    fn weekends_at_end_of_representable_dates() {
        let result = weekend_dates_between(NaiveDate::MAX - chrono::Days::new(10), NaiveDate::MAX);
        assert!(result.len() <= 4);
        assert!(result.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn weekdays_skips_weekends() {
        let result = weekdays_between(date(2025, 1, 13), date(2025, 1, 19));
        assert_eq!(
            result,
            vec![
                date(2025, 1, 13),
                date(2025, 1, 14),
                date(2025, 1, 15),
                date(2025, 1, 16),
                date(2025, 1, 17),
            ]
        );
        assert_eq!(weekdays_between(date(2025, 1, 6), date(2025, 1, 17)).len(), 10);
    }

    #[test]
    fn adjust_month_rolls_over_years() {
        assert_eq!(adjust_month(ym(2024, 11), 1), ym(2025, 0));
        assert_eq!(adjust_month(ym(2024, 0), -1), ym(2023, 11));
    }

    #[test]
    fn adjust_month_multi_month_deltas() {
        assert_eq!(adjust_month(ym(2024, 5), 0), ym(2024, 5));
        assert_eq!(adjust_month(ym(2024, 5), 18), ym(2025, 11));
        assert_eq!(adjust_month(ym(2024, 5), -30), ym(2021, 11));
        assert_eq!(adjust_month(ym(2024, 2), -11), ym(2023, 3));
    }

    #[test]
    fn month_start_offset_extreme_years() {
        assert!(month_start_offset(i32::MAX, 11) < 7);
        assert!(month_start_offset(i32::MIN, 0) < 7);
        assert!(month_start_offset(2_000_000_000, 0) < 7);
    }

    #[test]
    fn adjust_month_saturates_at_supported_years() {
        let mut month = ym(2025, 0);
        for _ in 0..13 {
            month = adjust_month(month, i32::MAX);
        }
        assert_eq!(month, ym(max_supported_year(), 11));
        assert!(month.first_day().is_some());

        let mut month = ym(2025, 0);
        for _ in 0..13 {
            month = adjust_month(month, i32::MIN);
        }
        assert_eq!(month, ym(min_supported_year(), 0));
        assert!(month.first_day().is_some());
    }

    #[test]
    fn year_month_rejects_unsupported_year() {
        assert_eq!(
            YearMonth::new(2_000_000_000, 0),
            Err(RangeError::UnsupportedYear(2_000_000_000))
        );
        assert!(YearMonth::new(max_supported_year(), 11).is_ok());
        assert!(YearMonth::new(min_supported_year(), 0).is_ok());
    }

    #[test]
    fn year_month_rejects_bad_month() {
        assert_eq!(YearMonth::new(2024, 12), Err(RangeError::InvalidMonth(12)));
    }

    #[test]
    fn year_month_display() {
        assert_eq!(ym(2025, 0).to_string(), "January 2025");
        assert_eq!(ym(2024, 11).month(), Month::December);
    }

    #[test]
    fn display_year_bounds() {
        assert!(DisplayYear::new(1900).is_ok());
        assert!(DisplayYear::new(2100).is_ok());
        assert_eq!(DisplayYear::new(1899), Err(RangeError::YearOutOfRange(1899)));
        assert!(DisplayYear::try_from(2101).is_err());
        assert_eq!(DisplayYear::options().count(), 201);
        assert_eq!(DisplayYear::options().next().map(DisplayYear::get), Some(1900));
    }
}
