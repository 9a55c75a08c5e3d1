//! Error types for waveform synthesis and upload.

use thiserror::Error;

/// Result type for waveform operations.
pub type WaveformResult<T> = Result<T, WaveformError>;

/// Errors that can occur while building or handing off a waveform.
#[derive(Debug, Error)]
pub enum WaveformError {
    /// A run of samples would be written past the end of the buffer.
    #[error("waveform capacity exceeded: {requested} samples requested at position {cursor}, capacity {capacity}")]
    CapacityExceeded {
        /// Samples the caller tried to append.
        requested: usize,
        /// Write position at the time of the call.
        cursor: usize,
        /// Fixed buffer length.
        capacity: usize,
    },

    /// Character with no entry in the symbol code table.
    #[error("no symbol code for character {0:?}")]
    UnknownSymbol(char),

    #[error("waveform length must be at least 1")]
    InvalidLength,

    #[error("maximum sample value must be greater than 0")]
    InvalidCeiling,

    #[error("at least one harmonic is required")]
    NoHarmonics,

    /// A sample lies outside [0, max].
    #[error("sample {value} at index {index} exceeds maximum {max}")]
    SampleOutOfRange { index: usize, value: u16, max: u16 },

    /// Invalid configuration value.
    #[error("invalid config '{name}': {message}")]
    InvalidConfig { name: String, message: String },

    /// The uploader could not deliver the waveform.
    #[error("upload to slot {slot} failed after preparing {bytes} bytes: {reason}")]
    UploadFailed { slot: u8, bytes: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WaveformError {
    /// Creates an invalid config error.
    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wraps any failure inside an uploader with the slot and payload size.
    pub fn upload_failed(slot: u8, bytes: usize, reason: impl ToString) -> Self {
        Self::UploadFailed {
            slot,
            bytes,
            reason: reason.to_string(),
        }
    }
}
