//! On/off keyed waveform rendered from Morse symbols.
//!
//! Every pulse is followed by one gap, so a letter is a plain run of
//! pulse/gap pairs with no extra spacing between letters. Durations are
//! `base_unit * factor` samples.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{WaveformError, WaveformResult};
use crate::waveform::Waveform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
}

use Symbol::{Dash, Dot};

/// Pulse and gap lengths, in multiples of `base_unit` samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTiming {
    pub base_unit: usize,
    pub dot_factor: usize,
    pub dash_factor: usize,
    pub space_factor: usize,
}

impl Default for SymbolTiming {
    fn default() -> Self {
        Self {
            base_unit: 12,
            dot_factor: 8,
            dash_factor: 20,
            space_factor: 5,
        }
    }
}

impl SymbolTiming {
    /// Pulse length in samples. Saturates at `usize::MAX`, which no buffer
    /// can hold, so an oversized factor surfaces as `CapacityExceeded`.
    pub fn duration(&self, symbol: Symbol) -> usize {
        let factor = match symbol {
            Dot => self.dot_factor,
            Dash => self.dash_factor,
        };
        self.base_unit.saturating_mul(factor)
    }

    pub fn gap(&self) -> usize {
        self.base_unit.saturating_mul(self.space_factor)
    }

    /// Samples a letter occupies, pulses and trailing gaps included.
    pub fn letter_len(&self, code: &[Symbol]) -> usize {
        code.iter()
            .map(|&s| self.duration(s).saturating_add(self.gap()))
            .fold(0usize, usize::saturating_add)
    }

    /// Rejects factors whose products do not fit in `usize` or whose
    /// dash plus trailing gap is longer than `capacity`.
    pub fn check(&self, capacity: usize) -> WaveformResult<()> {
        let product = |name: &str, factor: usize| {
            self.base_unit.checked_mul(factor).ok_or_else(|| {
                WaveformError::invalid_config("timing", format!("base_unit * {name} overflows"))
            })
        };
        let dot = product("dot_factor", self.dot_factor)?;
        let dash = product("dash_factor", self.dash_factor)?;
        let gap = product("space_factor", self.space_factor)?;

        let longest = dot.max(dash).checked_add(gap).unwrap_or(usize::MAX);
        if longest > capacity {
            return Err(WaveformError::invalid_config(
                "timing",
                format!("a {longest}-sample symbol does not fit in capacity {capacity}"),
            ));
        }
        Ok(())
    }
}

/// International Morse code for letters and digits. Case-insensitive.
pub fn code_for(ch: char) -> Option<&'static [Symbol]> {
    let code: &'static [Symbol] = match ch.to_ascii_uppercase() {
        'A' => &[Dot, Dash],
        'B' => &[Dash, Dot, Dot, Dot],
        'C' => &[Dash, Dot, Dash, Dot],
        'D' => &[Dash, Dot, Dot],
        'E' => &[Dot],
        'F' => &[Dot, Dot, Dash, Dot],
        'G' => &[Dash, Dash, Dot],
        'H' => &[Dot, Dot, Dot, Dot],
        'I' => &[Dot, Dot],
        'J' => &[Dot, Dash, Dash, Dash],
        'K' => &[Dash, Dot, Dash],
        'L' => &[Dot, Dash, Dot, Dot],
        'M' => &[Dash, Dash],
        'N' => &[Dash, Dot],
        'O' => &[Dash, Dash, Dash],
        'P' => &[Dot, Dash, Dash, Dot],
        'Q' => &[Dash, Dash, Dot, Dash],
        'R' => &[Dot, Dash, Dot],
        'S' => &[Dot, Dot, Dot],
        'T' => &[Dash],
        'U' => &[Dot, Dot, Dash],
        'V' => &[Dot, Dot, Dot, Dash],
        'W' => &[Dot, Dash, Dash],
        'X' => &[Dash, Dot, Dot, Dash],
        'Y' => &[Dash, Dot, Dash, Dash],
        'Z' => &[Dash, Dash, Dot, Dot],
        '0' => &[Dash, Dash, Dash, Dash, Dash],
        '1' => &[Dot, Dash, Dash, Dash, Dash],
        '2' => &[Dot, Dot, Dash, Dash, Dash],
        '3' => &[Dot, Dot, Dot, Dash, Dash],
        '4' => &[Dot, Dot, Dot, Dot, Dash],
        '5' => &[Dot, Dot, Dot, Dot, Dot],
        '6' => &[Dash, Dot, Dot, Dot, Dot],
        '7' => &[Dash, Dash, Dot, Dot, Dot],
        '8' => &[Dash, Dash, Dash, Dot, Dot],
        '9' => &[Dash, Dash, Dash, Dash, Dot],
        _ => return None,
    };
    Some(code)
}

/// Fixed-capacity buffer with a monotonic write cursor.
///
/// The buffer starts zero-filled. `append_run` is the only method that
/// writes; everything else is expressed in terms of it.
pub struct WaveformBuilder {
    buffer: Vec<u16>,
    cursor: usize,
    on_value: u16,
    timing: SymbolTiming,
}

impl WaveformBuilder {
    pub fn new(capacity: usize, on_value: u16, timing: SymbolTiming) -> Self {
        WaveformBuilder {
            buffer: vec![0; capacity],
            cursor: 0,
            on_value,
            timing,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn timing(&self) -> &SymbolTiming {
        &self.timing
    }

    /// Writes `count` copies of `value` at the cursor and advances it.
    ///
    /// Fails without touching the buffer if the run does not fit or `value`
    /// is above the "on" value.
    pub fn append_run(&mut self, value: u16, count: usize) -> WaveformResult<()> {
        if value > self.on_value {
            return Err(WaveformError::SampleOutOfRange {
                index: self.cursor,
                value,
                max: self.on_value,
            });
        }
        if count > self.remaining() {
            warn!(
                requested = count,
                cursor = self.cursor,
                capacity = self.capacity(),
                "run does not fit in waveform"
            );
            return Err(WaveformError::CapacityExceeded {
                requested: count,
                cursor: self.cursor,
                capacity: self.capacity(),
            });
        }
        let end = self.cursor + count;
        self.buffer[self.cursor..end].fill(value);
        self.cursor = end;
        Ok(())
    }

    pub fn emit_gap(&mut self) -> WaveformResult<()> {
        self.append_run(0, self.timing.gap())
    }

    /// Pulse at the "on" value followed by the inter-symbol gap.
    pub fn emit_pulse(&mut self, symbol: Symbol) -> WaveformResult<()> {
        self.append_run(self.on_value, self.timing.duration(symbol))?;
        self.emit_gap()
    }

    pub fn emit_letter(&mut self, letter: char) -> WaveformResult<()> {
        let code = code_for(letter).ok_or(WaveformError::UnknownSymbol(letter))?;
        for &symbol in code {
            self.emit_pulse(symbol)?;
        }
        Ok(())
    }

    /// Emits each character in turn. A space adds one extra gap.
    pub fn emit_message(&mut self, message: &str) -> WaveformResult<()> {
        for ch in message.chars() {
            if ch == ' ' {
                self.emit_gap()?;
            } else {
                self.emit_letter(ch)?;
            }
        }
        Ok(())
    }

    /// Hands the buffer over; anything past the cursor stays at 0.
    pub fn finish(self) -> WaveformResult<Waveform> {
        Waveform::from_samples(self.buffer, self.on_value)
    }
}

pub struct MorseRender {
    pub waveform: Waveform,
    /// Samples written by the message, the cursor's final position.
    pub written: usize,
}

pub fn render_message(
    message: &str,
    timing: SymbolTiming,
    capacity: usize,
    on_value: u16,
) -> WaveformResult<MorseRender> {
    let mut builder = WaveformBuilder::new(capacity, on_value, timing);
    builder.emit_message(message)?;
    let written = builder.cursor();
    debug!(message, written, capacity, "rendered morse message");
    Ok(MorseRender {
        waveform: builder.finish()?,
        written,
    })
}
