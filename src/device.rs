//! Handoff of finished waveforms to a signal generator slot.
//!
//! The serial protocol of the generator lives outside this crate. Anything
//! that can take a waveform for a slot implements [`Uploader`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{WaveformError, WaveformResult};
use crate::waveform::Waveform;
use crate::wav_writer::write_waveform_wav;

/// What an uploader reports back after a successful transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    pub slot: u8,
    pub samples: usize,
    pub bytes: usize,
}

impl UploadReceipt {
    pub fn for_waveform(slot: u8, waveform: &Waveform) -> Self {
        UploadReceipt {
            slot,
            samples: waveform.len(),
            bytes: waveform.byte_len(),
        }
    }
}

pub trait Uploader {
    /// Stores `waveform` in arbitrary-waveform slot `slot`. Blocks until the
    /// transfer has completed or failed.
    fn upload(&mut self, slot: u8, waveform: Waveform) -> WaveformResult<UploadReceipt>;

    /// False for uploaders that only pretend to transfer.
    fn transfers(&self) -> bool {
        true
    }
}

/// Logs instead of transferring; keeps every receipt for inspection.
#[derive(Debug, Default)]
pub struct DryRunUploader {
    port: String,
    history: Vec<UploadReceipt>,
}

impl DryRunUploader {
    pub fn new(port: impl Into<String>) -> Self {
        DryRunUploader {
            port: port.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[UploadReceipt] {
        &self.history
    }
}

impl Uploader for DryRunUploader {
    fn upload(&mut self, slot: u8, waveform: Waveform) -> WaveformResult<UploadReceipt> {
        let receipt = UploadReceipt::for_waveform(slot, &waveform);
        info!(
            port = %self.port,
            slot,
            samples = receipt.samples,
            bytes = receipt.bytes,
            "dry run, skipping upload"
        );
        self.history.push(receipt.clone());
        Ok(receipt)
    }

    fn transfers(&self) -> bool {
        false
    }
}

/// Sidecar written next to each exported slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub slot: u8,
    pub port: String,
    pub samples: usize,
    pub max_value: u16,
    pub peak: u16,
    pub exported_at: DateTime<Utc>,
}

/// Writes each slot as `slot_<N>.wav` plus a `slot_<N>.json` manifest.
pub struct WavExportUploader {
    dir: PathBuf,
    port: String,
}

impl WavExportUploader {
    pub fn new(dir: impl Into<PathBuf>, port: impl Into<String>) -> Self {
        WavExportUploader {
            dir: dir.into(),
            port: port.into(),
        }
    }

    pub fn wav_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("slot_{slot}.wav"))
    }

    pub fn manifest_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("slot_{slot}.json"))
    }

    fn export(&self, slot: u8, waveform: &Waveform) -> WaveformResult<()> {
        fs::create_dir_all(&self.dir)?;
        write_waveform_wav(self.wav_path(slot), waveform)?;

        let manifest = ExportManifest {
            slot,
            port: self.port.clone(),
            samples: waveform.len(),
            max_value: waveform.max_value(),
            peak: waveform.peak(),
            exported_at: Utc::now(),
        };
        fs::write(
            self.manifest_path(slot),
            serde_json::to_string_pretty(&manifest)?,
        )?;
        Ok(())
    }
}

impl Uploader for WavExportUploader {
    fn upload(&mut self, slot: u8, waveform: Waveform) -> WaveformResult<UploadReceipt> {
        let receipt = UploadReceipt::for_waveform(slot, &waveform);
        self.export(slot, &waveform)
            .map_err(|e| WaveformError::upload_failed(slot, receipt.bytes, e))?;
        info!(dir = %self.dir.display(), slot, samples = receipt.samples, "exported waveform");
        Ok(receipt)
    }
}

pub fn read_manifest<P: AsRef<Path>>(path: P) -> WaveformResult<ExportManifest> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
