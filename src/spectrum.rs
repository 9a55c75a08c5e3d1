use rustfft::{num_complex::Complex, FftPlanner};

use crate::waveform::Waveform;

/// Relative strength of harmonics 1..=count, treating the waveform as one
/// full period. The strongest harmonic reads 1.0; DC is ignored.
///
/// At most `len / 2` harmonics are returned, the highest a waveform of that
/// length can carry.
pub fn harmonic_magnitudes(waveform: &Waveform, count: usize) -> Vec<f32> {
    let n = waveform.len();
    let count = count.min(n / 2);
    if count == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f32>> = waveform
        .samples()
        .iter()
        .map(|&v| Complex::new(v as f32, 0.0))
        .collect();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let mut mags: Vec<f32> = buffer[1..=count]
        .iter()
        .map(|v| (v.re * v.re + v.im * v.im).sqrt() / n as f32)
        .collect();

    let peak = mags.iter().copied().fold(0.0f32, f32::max);
    if peak > 0.0 {
        for m in mags.iter_mut() {
            *m /= peak;
        }
    }
    mags
}
