use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use weekday_range_core::range::PredefinedRange;

use crate::error::PresetError;
use crate::provider::PresetProvider;
use crate::relative;

/// Environment variable naming a preset file.
pub const PRESETS_ENV: &str = "WEEKDAY_RANGE_PRESETS";

/// One entry of a preset file: either fixed bounds or a trailing window.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PresetEntry {
    Absolute {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    Relative {
        label: String,
        last_days: u32,
    },
}

impl PresetEntry {
    fn resolve(self, today: NaiveDate) -> Result<PredefinedRange, PresetError> {
        match self {
            PresetEntry::Absolute { label, start, end } => Ok(PredefinedRange::new(label, start, end)?),
            PresetEntry::Relative { label, last_days } => relative::last_days(&label, last_days, today),
        }
    }
}

/// Parse a JSON array of preset entries.
pub fn parse_presets(json: &str, today: NaiveDate) -> Result<Vec<PredefinedRange>, PresetError> {
    let entries: Vec<PresetEntry> = serde_json::from_str(json)?;
    entries.into_iter().map(|e| e.resolve(today)).collect()
}

/// Presets loaded from a JSON file.
///
/// ```json
/// [
///   { "label": "Q1", "start": "2025-01-01", "end": "2025-03-31" },
///   { "label": "Last 14 Days", "last_days": 14 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct FilePresets {
    path: PathBuf,
}

impl FilePresets {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create from the `WEEKDAY_RANGE_PRESETS` environment variable.
    pub fn from_env() -> Result<Self, PresetError> {
        let path = std::env::var(PRESETS_ENV)
            .map_err(|_| PresetError::Config(format!("{PRESETS_ENV} not set")))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresetProvider for FilePresets {
    fn name(&self) -> &str {
        "file"
    }

    fn presets(&self, today: NaiveDate) -> Result<Vec<PredefinedRange>, PresetError> {
        let json = std::fs::read_to_string(&self.path)?;
        let presets = parse_presets(&json, today)?;
        debug!("loaded {} preset(s) from {}", presets.len(), self.path.display());
        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_mixed_entries_in_order() {
        let json = r#"[
            { "label": "Q1", "start": "2025-01-01", "end": "2025-03-31" },
            { "label": "Last 14 Days", "last_days": 14 }
        ]"#;
        let presets = parse_presets(json, date(2025, 1, 29)).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].label(), "Q1");
        assert_eq!(presets[0].span().end(), date(2025, 3, 31));
        assert_eq!(presets[1].label(), "Last 14 Days");
        assert_eq!(presets[1].span().start(), date(2025, 1, 16));
        assert_eq!(presets[1].span().end(), date(2025, 1, 29));
    }

    #[test]
    fn inverted_entry_rejected() {
        let json = r#"[{ "label": "Backwards", "start": "2025-03-31", "end": "2025-01-01" }]"#;
        let err = parse_presets(json, date(2025, 1, 29)).unwrap_err();
        assert!(matches!(err, PresetError::Range(_)));
    }

    #[test]
    fn zero_day_window_rejected() {
        let json = r#"[{ "label": "Empty", "last_days": 0 }]"#;
        let err = parse_presets(json, date(2025, 1, 29)).unwrap_err();
        assert!(matches!(err, PresetError::Config(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = parse_presets(r#"[{ "label": "No bounds" }]"#, date(2025, 1, 29)).unwrap_err();
        assert!(matches!(err, PresetError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, r#"[{ "label": "Last 7 Days", "last_days": 7 }]"#).unwrap();

        let provider = FilePresets::new(&path);
        assert_eq!(provider.name(), "file");
        assert_eq!(provider.path(), path.as_path());
        let presets = provider.presets(date(2025, 1, 29)).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].span().start(), date(2025, 1, 23));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FilePresets::new(dir.path().join("nope.json"));
        let err = provider.presets(date(2025, 1, 29)).unwrap_err();
        assert!(matches!(err, PresetError::Io(_)));
    }
}
