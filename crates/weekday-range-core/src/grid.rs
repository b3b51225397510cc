use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{self, YearMonth};
use crate::range::DateRange;

/// Column headers of a Sunday-first month grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Rendering class of a day cell. When several apply, the first listed wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    Today,
    RangeStart,
    InRange,
    Weekend,
    Weekday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Padding before the 1st of the month.
    Empty,
    Day { date: NaiveDate, class: DayClass },
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Empty => None,
            CalendarCell::Day { date, .. } => Some(*date),
        }
    }

    /// Padding and weekend cells do not accept clicks.
    pub fn is_clickable(&self) -> bool {
        match self {
            CalendarCell::Empty => false,
            CalendarCell::Day { date, .. } => calendar::is_weekday(*date),
        }
    }
}

/// Classify a single day against the current selection and hover preview.
pub fn classify(
    date: NaiveDate,
    today: NaiveDate,
    range: &DateRange,
    hovered: Option<NaiveDate>,
) -> DayClass {
    let weekend = calendar::is_weekend(date);
    let start = range.start();

    if date == today {
        return DayClass::Today;
    }
    if start == Some(date) {
        return DayClass::RangeStart;
    }
    if !weekend {
        let in_span = range.span().is_some_and(|span| span.contains(date));
        let in_preview = match (start, hovered) {
            (Some(start), Some(hovered)) => start <= date && date <= hovered,
            _ => false,
        };
        if in_span || in_preview {
            return DayClass::InRange;
        }
    }
    if weekend {
        DayClass::Weekend
    } else {
        DayClass::Weekday
    }
}

/// One rendered month: leading padding followed by every day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    #[serde(skip)]
    month: YearMonth,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn build(
        month: YearMonth,
        today: NaiveDate,
        range: &DateRange,
        hovered: Option<NaiveDate>,
    ) -> Self {
        let padding = month.start_offset() as usize;
        let mut cells = vec![CalendarCell::Empty; padding];
        if let Some(first) = month.first_day() {
            cells.extend(first.iter_days().take(month.days() as usize).map(|date| {
                CalendarCell::Day {
                    date,
                    class: classify(date, today, range, hovered),
                }
            }));
        }
        Self { month, cells }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.date() == Some(date))
    }
}
