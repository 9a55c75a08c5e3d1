use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WaveformError, WaveformResult};
use crate::harmonic::{default_harmonics, Harmonic};
use crate::morse::SymbolTiming;
use crate::waveform::{DEFAULT_CAPACITY, DEFAULT_MAX_VALUE, MAX_CAPACITY};

/// Settings shared by both generator binaries. Every field has a default, so
/// a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Serial port of the signal generator.
    pub port: String,
    /// Arbitrary-waveform slot to write. Each binary has its own default.
    pub slot: Option<u8>,
    pub capacity: usize,
    pub max_value: u16,
    pub timing: SymbolTiming,
    pub harmonics: Vec<Harmonic>,
    pub message: String,
    /// Build the waveform but skip the upload.
    pub dry_run: bool,
    /// Where uploaded slots are written.
    pub export_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            slot: None,
            capacity: DEFAULT_CAPACITY,
            max_value: DEFAULT_MAX_VALUE,
            timing: SymbolTiming::default(),
            harmonics: default_harmonics(),
            message: "SOS".to_string(),
            dry_run: false,
            export_dir: PathBuf::from("waveforms"),
        }
    }
}

impl GeneratorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> WaveformResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    pub fn validate(&self) -> WaveformResult<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(WaveformError::invalid_config(
                "capacity",
                format!("must be between 1 and {MAX_CAPACITY}"),
            ));
        }
        if self.max_value == 0 {
            return Err(WaveformError::invalid_config("max_value", "must be greater than 0"));
        }
        if self.port.trim().is_empty() {
            return Err(WaveformError::invalid_config("port", "must not be empty"));
        }
        let t = &self.timing;
        if t.base_unit == 0 || t.dot_factor == 0 || t.dash_factor == 0 {
            return Err(WaveformError::invalid_config(
                "timing",
                "base_unit, dot_factor and dash_factor must be non-zero",
            ));
        }
        t.check(self.capacity)?;
        if self.export_dir.as_os_str().is_empty() {
            return Err(WaveformError::invalid_config("export_dir", "must not be empty"));
        }
        if self.harmonics.is_empty() {
            return Err(WaveformError::invalid_config("harmonics", "list is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "slot": 2, "timing": { "base_unit": 10 } }"#).unwrap();
        assert_eq!(config.slot, Some(2));
        assert_eq!(config.timing.base_unit, 10);
        assert_eq!(config.timing.dash_factor, 20);
        assert_eq!(config.capacity, 2048);
        assert_eq!(config.harmonics, default_harmonics());
        assert!(!config.dry_run);
    }

    #[test]
    fn harmonic_amplitude_defaults_to_one() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "harmonics": [{ "multiple": 5 }] }"#).unwrap();
        assert_eq!(config.harmonics, vec![Harmonic::new(5, 1.0)]);
    }

    #[test]
    fn validate_rejects_zero_capacity() {
        let config = GeneratorConfig {
            capacity: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WaveformError::InvalidConfig { ref name, .. }) if name == "capacity"
        ));
    }

    #[test]
    fn validate_rejects_oversized_capacity() {
        let config = GeneratorConfig {
            capacity: MAX_CAPACITY + 1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WaveformError::InvalidConfig { ref name, .. }) if name == "capacity"
        ));
    }

    #[test]
    fn validate_rejects_overflowing_timing() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{ "timing": { "base_unit": 9223372036854775808, "dot_factor": 2 } }"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(WaveformError::InvalidConfig { ref name, .. }) if name == "timing"
        ));

        // Rendering the same timing directly fails cleanly too.
        let err = crate::morse::render_message("E", config.timing, config.capacity, config.max_value)
            .err()
            .unwrap();
        assert!(matches!(err, WaveformError::CapacityExceeded { cursor: 0, .. }));
    }

    #[test]
    fn validate_rejects_symbol_longer_than_capacity() {
        let config = GeneratorConfig {
            capacity: 100,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sg.json");
        fs::write(&path, r#"{ "dry_run": true, "message": "HI" }"#).unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.message, "HI");
    }
}
