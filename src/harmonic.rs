//! Periodic waveform built from a sum of sine partials, rescaled to the
//! integer range of the device.
//!
//! One period is sampled at `len` equally spaced points over `[0, 2π)`. The
//! samples are shifted so the minimum lands on 0, then multiplied by the
//! integer scale `floor(max_value / shifted_max)`. Truncating the scale keeps
//! every sample at or below `max_value`, so the peak usually lands a little
//! under the ceiling.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WaveformError, WaveformResult};
use crate::waveform::Waveform;

/// One sine partial at an integer multiple of the base frequency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub multiple: u32,
    #[serde(default = "unit_amplitude")]
    pub amplitude: f64,
}

fn unit_amplitude() -> f64 {
    1.0
}

impl Harmonic {
    pub fn new(multiple: u32, amplitude: f64) -> Self {
        Harmonic { multiple, amplitude }
    }
}

/// `sin(x) + sin(2x) + sin(3x)`.
pub fn default_harmonics() -> Vec<Harmonic> {
    (1..=3).map(|m| Harmonic::new(m, 1.0)).collect()
}

/// Output of the synthesizer along with the values the rescale was derived from.
#[derive(Clone, Debug)]
pub struct HarmonicRender {
    pub waveform: Waveform,
    /// Minimum of the raw function over the sampled period.
    pub min: f64,
    /// Maximum after shifting the minimum to 0.
    pub shifted_max: f64,
    pub scale: f64,
}

pub fn synthesize(len: usize, max_value: u16) -> WaveformResult<HarmonicRender> {
    synthesize_with(len, max_value, &default_harmonics())
}

pub fn synthesize_with(
    len: usize,
    max_value: u16,
    harmonics: &[Harmonic],
) -> WaveformResult<HarmonicRender> {
    if len == 0 {
        return Err(WaveformError::InvalidLength);
    }
    if max_value == 0 {
        return Err(WaveformError::InvalidCeiling);
    }
    if harmonics.is_empty() {
        return Err(WaveformError::NoHarmonics);
    }

    let step = 2.0 * PI / len as f64;
    let raw: Vec<f64> = (0..len)
        .map(|i| evaluate(harmonics, step * i as f64))
        .collect();

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted: Vec<f64> = raw.iter().map(|v| v - min).collect();
    let shifted_max = shifted.iter().copied().fold(0.0f64, f64::max);

    // A flat function has nothing to stretch.
    let scale = if shifted_max > 0.0 {
        (max_value as f64 / shifted_max).floor()
    } else {
        0.0
    };

    let samples = shifted
        .iter()
        .map(|v| (v * scale).round().min(max_value as f64) as u16)
        .collect();
    let waveform = Waveform::from_samples(samples, max_value)?;

    debug!(len, max_value, min, shifted_max, scale, "synthesized harmonic waveform");

    Ok(HarmonicRender {
        waveform,
        min,
        shifted_max,
        scale,
    })
}

fn evaluate(harmonics: &[Harmonic], x: f64) -> f64 {
    harmonics
        .iter()
        .map(|h| h.amplitude * (h.multiple as f64 * x).sin())
        .sum()
}
