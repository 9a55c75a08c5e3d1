//! Waveform synthesis for arbitrary-waveform signal generators.
//!
//! Two independent synthesizers fill a fixed-length integer waveform:
//! [`harmonic`] sums sine partials and rescales them to the device range,
//! [`morse`] keys a message as on/off pulses. The result is handed by value
//! to a [`device::Uploader`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod harmonic;
pub mod morse;
pub mod spectrum;
pub mod wav_writer;
pub mod waveform;

pub use config::GeneratorConfig;
pub use device::{DryRunUploader, UploadReceipt, Uploader, WavExportUploader};
pub use error::{WaveformError, WaveformResult};
pub use waveform::Waveform;
