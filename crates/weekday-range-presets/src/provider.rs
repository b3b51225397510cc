use chrono::NaiveDate;
use weekday_range_core::range::PredefinedRange;

use crate::error::PresetError;

/// Source of predefined ranges offered when the picker is mounted.
pub trait PresetProvider {
    /// Provider name (for logging/display).
    fn name(&self) -> &str;

    /// Resolve the presets against `today`, in display order.
    fn presets(&self, today: NaiveDate) -> Result<Vec<PredefinedRange>, PresetError>;
}
