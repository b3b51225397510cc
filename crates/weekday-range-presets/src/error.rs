use thiserror::Error;
use weekday_range_core::error::RangeError;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preset file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid preset range: {0}")]
    Range(#[from] RangeError),

    #[error("Preset configuration error: {0}")]
    Config(String),
}
