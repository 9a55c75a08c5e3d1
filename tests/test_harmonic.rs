//! Harmonic synthesizer integration tests.

use pretty_assertions::assert_eq;
use sg_waveforms::harmonic::{synthesize, synthesize_with, Harmonic};

#[test]
fn test_output_length_and_range_for_many_sizes() {
    for &(len, max) in &[(1usize, 1u16), (2, 4095), (7, 10), (256, 255), (2048, 4095), (3000, 65535)] {
        let render = synthesize(len, max).unwrap();
        let wf = &render.waveform;
        assert_eq!(wf.len(), len);
        assert!(wf.samples().iter().all(|&v| v <= max), "len={len} max={max}");
        assert!(wf.count_at(0) >= 1, "no zero sample for len={len} max={max}");
    }
}

#[test]
fn test_synthesis_is_deterministic() {
    let a = synthesize(2048, 4095).unwrap();
    let b = synthesize(2048, 4095).unwrap();
    assert_eq!(a.waveform, b.waveform);
    assert_eq!(a.scale, b.scale);
}

#[test]
fn test_scale_is_floor_of_ceiling_over_shifted_max() {
    let render = synthesize(2048, 4095).unwrap();
    assert_eq!(render.scale, (4095.0 / render.shifted_max).floor());
    assert!(render.scale >= 1.0);

    // Peak sits on the shifted maximum times the truncated scale.
    let expected_peak = (render.shifted_max * render.scale).round() as u16;
    assert_eq!(render.waveform.peak(), expected_peak);
    assert!(render.waveform.peak() <= 4095);
}

#[test]
fn test_near_flat_sample_set() {
    // sin(2x) at 0 and π is zero up to rounding.
    let render = synthesize_with(2, 4095, &[Harmonic::new(2, 1.0)]).unwrap();
    assert!(render.shifted_max < 1e-9);
    assert!(render.waveform.peak() <= 4095);
}

#[test]
fn test_amplitude_weights_change_shape() {
    let even = synthesize_with(512, 4095, &[Harmonic::new(1, 1.0), Harmonic::new(3, 1.0)]).unwrap();
    let weak = synthesize_with(512, 4095, &[Harmonic::new(1, 1.0), Harmonic::new(3, 0.1)]).unwrap();
    assert!(even.waveform != weak.waveform);
}
