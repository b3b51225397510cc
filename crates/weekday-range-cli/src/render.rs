use std::fmt::Write;

use weekday_range_core::grid::{CalendarCell, DayClass, MonthGrid, WEEKDAY_LABELS};
use weekday_range_core::picker::RangePicker;
use weekday_range_core::range::{Confirmation, DateRange, PredefinedRange};

const LEGEND: &str = "* today  > start  = in range  . weekend (not selectable)";

fn marker(class: DayClass) -> char {
    match class {
        DayClass::Today => '*',
        DayClass::RangeStart => '>',
        DayClass::InRange => '=',
        DayClass::Weekend => '.',
        DayClass::Weekday => ' ',
    }
}

/// Month title, weekday header and one line per week. Each cell is four
/// columns wide: a class marker followed by the day number.
pub fn month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^28}", grid.month().to_string());
    for label in WEEKDAY_LABELS {
        let _ = write!(out, "  {label}");
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            match cell {
                CalendarCell::Empty => out.push_str("    "),
                CalendarCell::Day { date, class } => {
                    let _ = write!(out, " {}{:>2}", marker(*class), chrono::Datelike::day(date));
                }
            }
        }
        out.push('\n');
    }
    out.push_str(LEGEND);
    out.push('\n');
    out
}

pub fn range_status(range: &DateRange) -> String {
    match range {
        DateRange::Empty => "no selection".to_string(),
        DateRange::Pending { start } => format!("start {start}, pick an end date"),
        DateRange::Complete(span) => format!("{span} ({} day(s))", span.num_days()),
    }
}

pub fn preset_list(presets: &[PredefinedRange]) -> String {
    let mut out = String::new();
    for (i, preset) in presets.iter().enumerate() {
        let _ = writeln!(out, "[{}] {} ({})", i + 1, preset.label(), preset.span());
    }
    out
}

pub fn picker<H>(picker: &RangePicker<H>) -> String
where
    H: weekday_range_core::picker::SelectionHandler,
{
    let mut out = month_grid(&picker.grid());
    let _ = writeln!(out, "Selection: {}", range_status(picker.range()));
    if let Some(hovered) = picker.hovered() {
        let _ = writeln!(out, "Preview to: {hovered}");
    }
    out.push_str(&preset_list(picker.presets()));
    if picker.is_confirmable() {
        out.push_str("Type 'ok' to confirm.\n");
    }
    out
}

pub fn confirmation(confirmation: &Confirmation) -> String {
    let mut out = format!("Selected {}", confirmation.span);
    if confirmation.weekends.is_empty() {
        out.push_str(", no weekend days");
    } else {
        let dates: Vec<String> = confirmation.weekends.iter().map(|d| d.to_string()).collect();
        let _ = write!(
            out,
            ", {} weekend day(s): {}",
            confirmation.weekends.len(),
            dates.join(", ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weekday_range_core::calendar::YearMonth;
    use weekday_range_core::range::DateSpan;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_lines() {
        let span = DateSpan::new(date(2025, 1, 13), date(2025, 1, 15)).unwrap();
        let grid = MonthGrid::build(
            YearMonth::new(2025, 0).unwrap(),
            date(2025, 1, 29),
            &span.into(),
            None,
        );
        let text = month_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "January 2025");
        assert_eq!(lines[1], "  Su  Mo  Tu  We  Th  Fr  Sa");
        // Jan 1, 2025 is a Wednesday: three padding cells.
        assert_eq!(lines[2], "               1   2   3 . 4");
        assert_eq!(lines[4], " .12 >13 =14 =15  16  17 .18");
        assert!(lines[6].contains("*29"));
        assert_eq!(*lines.last().unwrap(), LEGEND);
    }

    #[test]
    fn confirmation_text() {
        let span = DateSpan::new(date(2025, 1, 17), date(2025, 1, 20)).unwrap();
        let text = confirmation(&Confirmation::for_span(span));
        assert_eq!(
            text,
            "Selected 2025-01-17 - 2025-01-20, 2 weekend day(s): 2025-01-18, 2025-01-19"
        );

        let span = DateSpan::new(date(2025, 1, 13), date(2025, 1, 17)).unwrap();
        assert!(confirmation(&Confirmation::for_span(span)).ends_with("no weekend days"));
    }

    #[test]
    fn status_text() {
        assert_eq!(range_status(&DateRange::Empty), "no selection");
        let pending = DateRange::Pending {
            start: date(2025, 1, 13),
        };
        assert_eq!(range_status(&pending), "start 2025-01-13, pick an end date");
    }
}
