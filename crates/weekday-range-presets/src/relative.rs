use chrono::{Days, NaiveDate};
use weekday_range_core::range::PredefinedRange;

use crate::error::PresetError;
use crate::provider::PresetProvider;

/// Build a "last N days" range ending on `today`, inclusive.
pub fn last_days(label: &str, days: u32, today: NaiveDate) -> Result<PredefinedRange, PresetError> {
    if days == 0 {
        return Err(PresetError::Config(format!(
            "preset '{label}': last_days must be at least 1"
        )));
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| PresetError::Config(format!("preset '{label}': {days} days before {today} is out of range")))?;
    Ok(PredefinedRange::new(label, start, today)?)
}

/// Ranges relative to today, such as "Last 7 Days".
#[derive(Debug, Clone)]
pub struct RelativePresets {
    entries: Vec<(String, u32)>,
}

impl RelativePresets {
    pub fn new(entries: Vec<(String, u32)>) -> Self {
        Self { entries }
    }
}

impl Default for RelativePresets {
    fn default() -> Self {
        Self::new(vec![
            ("Last 7 Days".to_string(), 7),
            ("Last 30 Days".to_string(), 30),
        ])
    }
}

impl PresetProvider for RelativePresets {
    fn name(&self) -> &str {
        "relative"
    }

    fn presets(&self, today: NaiveDate) -> Result<Vec<PredefinedRange>, PresetError> {
        self.entries
            .iter()
            .map(|(label, days)| last_days(label, *days, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_presets() {
        let presets = RelativePresets::default().presets(date(2025, 1, 29)).unwrap();
        assert_eq!(presets.len(), 2);

        assert_eq!(presets[0].label(), "Last 7 Days");
        assert_eq!(presets[0].span().start(), date(2025, 1, 23));
        assert_eq!(presets[0].span().end(), date(2025, 1, 29));
        assert_eq!(presets[0].span().num_days(), 7);

        assert_eq!(presets[1].label(), "Last 30 Days");
        assert_eq!(presets[1].span().start(), date(2024, 12, 31));
    }

    #[test]
    fn single_day_preset() {
        let preset = last_days("Today", 1, date(2025, 1, 18)).unwrap();
        assert_eq!(preset.span().start(), preset.span().end());
        assert_eq!(preset.span().weekend_dates(), vec![date(2025, 1, 18)]);
    }

    #[test]
    fn zero_days_rejected() {
        let err = last_days("Nothing", 0, date(2025, 1, 29)).unwrap_err();
        assert!(matches!(err, PresetError::Config(_)));
    }

    #[test]
    fn out_of_range_rejected() {
        let err = last_days("Forever", u32::MAX, NaiveDate::MIN).unwrap_err();
        assert!(matches!(err, PresetError::Config(_)));
    }
}
