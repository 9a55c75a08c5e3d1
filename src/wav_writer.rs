use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{WaveformError, WaveformResult};
use crate::waveform::Waveform;

/// Nominal playback rate for auditioning exports. The device ignores it.
const PREVIEW_SAMPLE_RATE: u32 = 48000;
const PCM_PEAK: f64 = i16::MAX as f64;

fn to_pcm(value: u16, max_value: u16) -> i16 {
    let unit = value as f64 / max_value as f64;
    ((unit * 2.0 - 1.0) * PCM_PEAK).round() as i16
}

fn from_pcm(sample: i16, max_value: u16) -> u16 {
    let unit = (sample as f64 / PCM_PEAK + 1.0) / 2.0;
    (unit * max_value as f64).round().clamp(0.0, max_value as f64) as u16
}

/// Writes the waveform as mono 16-bit PCM, mapping `[0, max]` onto the full
/// signed range.
pub fn write_waveform_wav<P: AsRef<Path>>(path: P, waveform: &Waveform) -> WaveformResult<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: PREVIEW_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &value in waveform.samples() {
        writer.write_sample(to_pcm(value, waveform.max_value()))?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn read_waveform_wav<P: AsRef<Path>>(path: P, max_value: u16) -> WaveformResult<Waveform> {
    if max_value == 0 {
        return Err(WaveformError::InvalidCeiling);
    }
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        return Err(WaveformError::invalid_config(
            "wav",
            format!(
                "expected mono 16-bit PCM, found {} channel(s) at {} bits",
                spec.channels, spec.bits_per_sample
            ),
        ));
    }

    let mut samples = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        samples.push(from_pcm(sample?, max_value));
    }
    Waveform::from_samples(samples, max_value)
}
