//! Error types for guitarkit

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuitarkitError {
    #[error("Unknown tone name: {0:?}")]
    UnknownTone(String),
    #[error("Unknown {category} option: {value:?}")]
    UnknownOption {
        category: &'static str,
        value: String,
    },
    #[error("Tempo out of range: {bpm} bpm (allowed 1..={max})")]
    TempoOutOfRange { bpm: u32, max: u32 },
    #[error("Unsupported note fraction: 1/{0}")]
    NoteFraction(u32),
    #[error("Unsupported beats per bar: {0}")]
    BeatsPerBar(u32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuitarkitError>;
