use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::RangeError;

/// A finalized, inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawSpan> for DateSpan {
    type Error = RangeError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        DateSpan::new(raw.start, raw.end)
    }
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, endpoints included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn weekend_dates(&self) -> Vec<NaiveDate> {
        calendar::weekend_dates_between(self.start, self.end)
    }

    pub fn weekdays(&self) -> Vec<NaiveDate> {
        calendar::weekdays_between(self.start, self.end)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Selection state of the picker.
///
/// An end date can only exist together with a start date, and the pair is
/// always ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    Empty,
    Pending {
        start: NaiveDate,
    },
    Complete(DateSpan),
}

impl DateRange {
    /// Build a range from two optional bounds.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, RangeError> {
        match (start, end) {
            (None, None) => Ok(DateRange::Empty),
            (None, Some(end)) => Err(RangeError::EndWithoutStart { end }),
            (Some(start), None) => Ok(DateRange::Pending { start }),
            (Some(start), Some(end)) => DateSpan::new(start, end).map(DateRange::Complete),
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            DateRange::Empty => None,
            DateRange::Pending { start } => Some(*start),
            DateRange::Complete(span) => Some(span.start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            DateRange::Complete(span) => Some(span.end),
            _ => None,
        }
    }

    pub fn span(&self) -> Option<DateSpan> {
        match self {
            DateRange::Complete(span) => Some(*span),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DateRange::Complete(_))
    }
}

impl From<DateSpan> for DateRange {
    fn from(span: DateSpan) -> Self {
        DateRange::Complete(span)
    }
}

/// A named shortcut range supplied by the caller when the picker is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedRange {
    label: String,
    #[serde(flatten)]
    span: DateSpan,
}

impl PredefinedRange {
    pub fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        Ok(Self::from_span(label, DateSpan::new(start, end)?))
    }

    pub fn from_span(label: impl Into<String>, span: DateSpan) -> Self {
        Self {
            label: label.into(),
            span,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span(&self) -> DateSpan {
        self.span
    }
}

/// Payload handed to the selection handler: the finalized range and every
/// weekend day inside it, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub span: DateSpan,
    pub weekends: Vec<NaiveDate>,
}

impl Confirmation {
    pub fn for_span(span: DateSpan) -> Self {
        Self {
            weekends: span.weekend_dates(),
            span,
        }
    }
}
