use chrono::NaiveDate;

use crate::dismiss::{DismissHub, DismissSubscription};
use crate::picker::{ConfirmationSlot, PickerOptions, RangePicker, SelectionHandler};
use crate::range::{DateRange, DateSpan, PredefinedRange};

const PLACEHOLDER: &str = "Select a date range";

struct OpenPicker {
    picker: RangePicker<ConfirmationSlot>,
    // Released when the picker is dropped, whichever way it closes.
    subscription: DismissSubscription,
}

/// Trigger that owns the stored selection and the open/closed picker.
///
/// The field mounts a [`RangePicker`] on open, forwards every confirmed
/// selection to its handler, and closes itself afterwards.
pub struct DateRangeField<H> {
    selected: Option<DateSpan>,
    open: Option<OpenPicker>,
    handler: H,
}

impl<H: SelectionHandler> DateRangeField<H> {
    pub fn new(handler: H) -> Self {
        Self {
            selected: None,
            open: None,
            handler,
        }
    }

    pub fn selected(&self) -> Option<DateSpan> {
        self.selected
    }

    /// Seed the stored selection, e.g. from a previous session's result.
    pub fn set_selected(&mut self, span: DateSpan) {
        self.selected = Some(span);
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Text shown on the trigger.
    pub fn label(&self) -> String {
        match self.selected {
            Some(span) => span.to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Mount a picker seeded with the stored selection. No-op when already open.
    pub fn open(&mut self, hub: &DismissHub, today: NaiveDate, presets: Vec<PredefinedRange>) {
        if self.open.is_some() {
            return;
        }
        let options = PickerOptions {
            initial: self.selected.map(DateRange::from).unwrap_or_default(),
            presets,
        };
        self.open = Some(OpenPicker {
            picker: RangePicker::mount(today, options, ConfirmationSlot::default()),
            subscription: hub.subscribe(),
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn toggle(&mut self, hub: &DismissHub, today: NaiveDate, presets: Vec<PredefinedRange>) {
        if self.is_open() {
            self.close();
        } else {
            self.open(hub, today, presets);
        }
    }

    /// Forget the stored selection and close the picker.
    pub fn clear(&mut self) {
        self.selected = None;
        self.close();
    }

    /// Close the picker if an outside click was dispatched. Returns true when
    /// it closed. Nothing is reported for the discarded selection.
    pub fn poll_dismissal(&mut self) -> bool {
        let dismissed = self
            .open
            .as_ref()
            .is_some_and(|open| open.subscription.is_dismissed());
        if dismissed {
            self.close();
        }
        dismissed
    }

    /// Borrow the open picker for rendering.
    pub fn picker(&self) -> Option<&RangePicker<ConfirmationSlot>> {
        self.open.as_ref().map(|open| &open.picker)
    }

    /// Run one interaction against the open picker.
    ///
    /// Returns `None` when the picker is closed or was dismissed. A
    /// confirmation produced by the interaction is stored, forwarded to the
    /// handler, and closes the picker.
    pub fn interact<R>(&mut self, f: impl FnOnce(&mut RangePicker<ConfirmationSlot>) -> R) -> Option<R> {
        if self.poll_dismissal() {
            return None;
        }
        let open = self.open.as_mut()?;
        let result = f(&mut open.picker);

        if let Some(confirmation) = open.picker.handler_mut().take() {
            self.selected = Some(confirmation.span);
            self.close();
            self.handler.on_select(&confirmation);
        }
        Some(result)
    }
}
