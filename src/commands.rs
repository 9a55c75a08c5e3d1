//! Bodies of the generator binaries. Diagnostics go to `out` so callers
//! other than `main` can capture them.

use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::cli::{deliver, resolve_config, uploader_for, CliOptions};
use crate::harmonic::synthesize_with;
use crate::morse::render_message;
use crate::spectrum::harmonic_magnitudes;

/// Slot the harmonic waveform goes to unless configured otherwise.
pub const HARMONIC_SLOT: u8 = 2;
/// Slot the Morse waveform goes to unless configured otherwise.
pub const MORSE_SLOT: u8 = 1;

pub fn run_harmonic(opts: &CliOptions, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(opts)?;
    let slot = config.slot.unwrap_or(HARMONIC_SLOT);

    let render = synthesize_with(config.capacity, config.max_value, &config.harmonics)?;
    info!(
        min = render.min,
        shifted_max = render.shifted_max,
        scale = render.scale,
        peak = render.waveform.peak(),
        "harmonic waveform ready"
    );

    // One bin past the highest partial, clamped by the spectrum to len / 2.
    let count = config
        .harmonics
        .iter()
        .map(|h| h.multiple as usize)
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    let mags = harmonic_magnitudes(&render.waveform, count);
    let line: Vec<String> = mags
        .iter()
        .enumerate()
        .map(|(k, m)| format!("h{}={:.2}", k + 1, m))
        .collect();
    writeln!(out, "Harmonic content: {}", line.join(" "))?;

    let mut uploader = uploader_for(&config);
    if let Some(receipt) = deliver(uploader.as_mut(), slot, render.waveform)? {
        writeln!(
            out,
            "Wrote waveform to signal generator slot {} ({} samples)",
            receipt.slot, receipt.samples
        )?;
    }
    writeln!(out, "Finished")?;
    Ok(())
}

pub fn run_morse(opts: &CliOptions, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(opts)?;
    let slot = config.slot.unwrap_or(MORSE_SLOT);

    let render = render_message(&config.message, config.timing, config.capacity, config.max_value)?;
    writeln!(out, "Wrote {} values to the array", render.written)?;
    writeln!(out, "Length of wf = {}", render.waveform.len())?;

    let mut uploader = uploader_for(&config);
    if let Some(receipt) = deliver(uploader.as_mut(), slot, render.waveform)? {
        writeln!(
            out,
            "Wrote waveform to signal generator slot {} ({} samples)",
            receipt.slot, receipt.samples
        )?;
    }
    Ok(())
}
