use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Range start {start} is after end {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("Range end {end} given without a start date")]
    EndWithoutStart { end: NaiveDate },

    #[error("Year {0} is outside the selectable range {min}-{max}", min = crate::calendar::MIN_DISPLAY_YEAR, max = crate::calendar::MAX_DISPLAY_YEAR)]
    YearOutOfRange(i32),

    #[error("Year {0} is outside the supported calendar")]
    UnsupportedYear(i32),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
}
