use chrono::{Month, NaiveDate};

use crate::calendar::{self, DisplayYear, YearMonth};
use crate::grid::MonthGrid;
use crate::range::{Confirmation, DateRange, DateSpan, PredefinedRange};

/// Receives every confirmed selection, whether confirmed explicitly or picked
/// from the predefined ranges.
pub trait SelectionHandler {
    fn on_select(&mut self, confirmation: &Confirmation);
}

impl<F> SelectionHandler for F
where
    F: FnMut(&Confirmation),
{
    fn on_select(&mut self, confirmation: &Confirmation) {
        self(confirmation)
    }
}

/// Handler that keeps the most recent confirmation until it is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationSlot(Option<Confirmation>);

impl ConfirmationSlot {
    pub fn take(&mut self) -> Option<Confirmation> {
        self.0.take()
    }

    pub fn peek(&self) -> Option<&Confirmation> {
        self.0.as_ref()
    }
}

impl SelectionHandler for ConfirmationSlot {
    fn on_select(&mut self, confirmation: &Confirmation) {
        self.0 = Some(confirmation.clone());
    }
}

/// Mount input.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub initial: DateRange,
    pub presets: Vec<PredefinedRange>,
}

/// What a day click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Weekend day; nothing changed.
    Ignored,
    /// First click on an empty selection.
    Started(NaiveDate),
    /// Click before the pending start moved the start.
    Reanchored(NaiveDate),
    /// Click on or after the pending start closed the range.
    Completed(DateSpan),
    /// Click on a complete range discarded it and started over.
    Restarted(NaiveDate),
}

/// Range selection controller for a weekday-only date range picker.
#[derive(Debug)]
pub struct RangePicker<H> {
    today: NaiveDate,
    range: DateRange,
    current_month: YearMonth,
    hovered: Option<NaiveDate>,
    presets: Vec<PredefinedRange>,
    handler: H,
}

impl<H: SelectionHandler> RangePicker<H> {
    /// Mount the picker. The grid opens on the month of the initial start
    /// date, or on the current month when nothing is selected.
    pub fn mount(today: NaiveDate, options: PickerOptions, handler: H) -> Self {
        let current_month = YearMonth::of(options.initial.start().unwrap_or(today));
        Self {
            today,
            range: options.initial,
            current_month,
            hovered: None,
            presets: options.presets,
            handler,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    pub fn hovered(&self) -> Option<NaiveDate> {
        self.hovered
    }

    pub fn presets(&self) -> &[PredefinedRange] {
        &self.presets
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Apply a day click. Weekend days are ignored.
    pub fn click(&mut self, date: NaiveDate) -> ClickOutcome {
        if calendar::is_weekend(date) {
            return ClickOutcome::Ignored;
        }

        let (range, outcome) = match self.range {
            DateRange::Empty => (DateRange::Pending { start: date }, ClickOutcome::Started(date)),
            DateRange::Pending { start } => match DateSpan::new(start, date) {
                Ok(span) => (DateRange::Complete(span), ClickOutcome::Completed(span)),
                // Earlier than the pending start.
                Err(_) => (DateRange::Pending { start: date }, ClickOutcome::Reanchored(date)),
            },
            DateRange::Complete(_) => {
                (DateRange::Pending { start: date }, ClickOutcome::Restarted(date))
            }
        };

        self.range = range;
        self.hovered = None;
        outcome
    }

    /// Record a hover preview. Only weekdays are previewed, and only while a
    /// start is pending.
    pub fn hover(&mut self, date: NaiveDate) {
        if calendar::is_weekday(date) && matches!(self.range, DateRange::Pending { .. }) {
            self.hovered = Some(date);
        }
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn is_confirmable(&self) -> bool {
        self.range.is_complete()
    }

    /// The confirm action, available only once both ends are chosen.
    pub fn confirmation(&mut self) -> Option<ConfirmAction<'_, H>> {
        let span = self.range.span()?;
        Some(ConfirmAction { picker: self, span })
    }

    /// Apply the mounted preset at `index` and report it immediately.
    /// Unknown indices are ignored.
    pub fn select_preset(&mut self, index: usize) -> Option<Confirmation> {
        let span = self.presets.get(index)?.span();
        Some(self.commit(span))
    }

    /// Apply any predefined range and report it immediately.
    pub fn apply_range(&mut self, preset: &PredefinedRange) -> Confirmation {
        self.commit(preset.span())
    }

    /// Move the displayed month by `delta` months.
    pub fn navigate(&mut self, delta: i32) {
        self.current_month = calendar::adjust_month(self.current_month, delta);
    }

    pub fn select_month(&mut self, month: Month) {
        let target = month.number_from_month() as i32 - 1;
        self.navigate(target - self.current_month.month0() as i32);
    }

    pub fn select_year(&mut self, year: DisplayYear) {
        self.current_month = self.current_month.with_year(year.get());
    }

    /// Drop the selection and preview without reporting anything.
    pub fn reset(&mut self) {
        self.range = DateRange::Empty;
        self.hovered = None;
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.current_month, self.today, &self.range, self.hovered)
    }

    fn commit(&mut self, span: DateSpan) -> Confirmation {
        self.range = DateRange::Complete(span);
        self.hovered = None;
        let confirmation = Confirmation::for_span(span);
        self.handler.on_select(&confirmation);
        confirmation
    }
}

/// Pending confirm of a complete range. Obtained from [`RangePicker::confirmation`].
#[derive(Debug)]
pub struct ConfirmAction<'a, H> {
    picker: &'a mut RangePicker<H>,
    span: DateSpan,
}

impl<H: SelectionHandler> ConfirmAction<'_, H> {
    pub fn span(&self) -> DateSpan {
        self.span
    }

    /// Compute the weekend list and hand the range to the handler.
    pub fn confirm(self) -> Confirmation {
        self.picker.commit(self.span)
    }
}
