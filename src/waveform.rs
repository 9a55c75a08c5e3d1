use crate::error::{WaveformError, WaveformResult};

/// Number of samples an arbitrary-waveform slot holds.
pub const DEFAULT_CAPACITY: usize = 2048;
/// Upper bound accepted from configuration.
pub const MAX_CAPACITY: usize = 1 << 20;
/// Largest value a sample may take (12-bit DAC).
pub const DEFAULT_MAX_VALUE: u16 = 4095;

/// Fixed-length integer samples ready to hand to an uploader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waveform {
    samples: Vec<u16>,
    max_value: u16,
}

impl Waveform {
    pub fn zeroed(capacity: usize, max_value: u16) -> Self {
        Waveform {
            samples: vec![0; capacity],
            max_value,
        }
    }

    pub fn from_samples(samples: Vec<u16>, max_value: u16) -> WaveformResult<Self> {
        if let Some(index) = samples.iter().position(|&v| v > max_value) {
            return Err(WaveformError::SampleOutOfRange {
                index,
                value: samples[index],
                max: max_value,
            });
        }
        Ok(Waveform { samples, max_value })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// Largest sample present, 0 for an empty waveform.
    pub fn peak(&self) -> u16 {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    pub fn count_at(&self, value: u16) -> usize {
        self.samples.iter().filter(|&&v| v == value).count()
    }

    /// Payload size of the waveform once packed as 16-bit words.
    pub fn byte_len(&self) -> usize {
        self.samples.len() * std::mem::size_of::<u16>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_capacity_and_no_signal() {
        let wf = Waveform::zeroed(DEFAULT_CAPACITY, DEFAULT_MAX_VALUE);
        assert_eq!(wf.len(), 2048);
        assert_eq!(wf.peak(), 0);
        assert_eq!(wf.count_at(0), 2048);
        assert_eq!(wf.byte_len(), 4096);
    }

    #[test]
    fn rejects_sample_above_max() {
        let err = Waveform::from_samples(vec![0, 10, 4096, 3], DEFAULT_MAX_VALUE).unwrap_err();
        match err {
            WaveformError::SampleOutOfRange { index, value, max } => {
                assert_eq!((index, value, max), (2, 4096, 4095));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_sample_at_max() {
        let wf = Waveform::from_samples(vec![0, 4095], DEFAULT_MAX_VALUE).unwrap();
        assert_eq!(wf.peak(), 4095);
        assert_eq!(wf.into_samples(), vec![0, 4095]);
    }
}
