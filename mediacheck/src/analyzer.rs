//! Audio level measurement over a platform frequency analyser
//!
//! The platform wires capture stream -> source node -> analyser node and
//! hands back a [`FrequencyAnalyser`]; this module owns the scratch sample
//! buffer and turns frequency-domain magnitudes into a 0-100 loudness value.

use serde::{Deserialize, Serialize};

use crate::error::MediaError;

/// Gain applied on top of the normalized mean so typical speech reads
/// visibly on a 0-100 meter.
const LEVEL_GAIN: f64 = 2.0;

/// Volume at or above which the signal counts as active.
const ACTIVITY_FLOOR: u8 = 5;

/// Fixed analysis parameters for the frequency analyser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyserConfig {
    /// Samples per analysis window; bins produced = fft_size / 2
    pub fft_size: usize,
    /// Exponential smoothing factor the platform applies across
    /// consecutive frames, 0.0 to 1.0
    pub smoothing_time_constant: f64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 256,
            smoothing_time_constant: 0.8,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins produced per analysis frame
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), MediaError> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(MediaError::InvalidConfiguration {
                message: format!("fft_size must be a power of two in 32..=32768, got {}", self.fft_size),
            });
        }

        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(MediaError::InvalidConfiguration {
                message: format!(
                    "smoothing_time_constant must be within 0.0..=1.0, got {}",
                    self.smoothing_time_constant
                ),
            });
        }

        Ok(())
    }
}

/// Platform-supplied frequency analyser node
///
/// Exposes post-smoothing frequency-domain magnitudes computed over a
/// sliding window of the captured audio.
pub trait FrequencyAnalyser: Send {
    /// Number of frequency bins produced per analysis frame
    fn frequency_bin_count(&self) -> usize;

    /// Fill `data` with the current magnitudes, one byte (0-255) per bin
    fn byte_frequency_data(&mut self, data: &mut [u8]);
}

/// Point-in-time audio activity snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAnalysis {
    /// Current loudness, 0-100
    pub volume: u8,
    /// Highest volume observed by this analyzer
    pub peak: u8,
    /// Whether the current volume clears the activity floor
    pub is_active: bool,
}

/// A frequency analyser paired with its reusable sample buffer
///
/// The buffer is sized to the analyser's bin count once at construction and
/// refilled in place on every read; its contents are the most recent frame
/// only. A given analyzer is meant to be read from a single polling loop.
pub struct AudioAnalyzer {
    analyser: Box<dyn FrequencyAnalyser>,
    samples: Vec<u8>,
    peak: u8,
}

impl AudioAnalyzer {
    /// Pair `analyser` with a scratch buffer sized to its bin count
    pub fn new(analyser: Box<dyn FrequencyAnalyser>) -> Self {
        let bins = analyser.frequency_bin_count();
        Self {
            analyser,
            samples: vec![0; bins],
            peak: 0,
        }
    }

    /// Number of frequency bins per read
    pub fn bin_count(&self) -> usize {
        self.samples.len()
    }

    /// Read the current loudness, 0-100
    pub fn level(&mut self) -> u8 {
        let volume = read_audio_level(self.analyser.as_mut(), &mut self.samples);
        self.peak = self.peak.max(volume);
        volume
    }

    /// Read the current loudness together with peak and activity state
    pub fn read(&mut self) -> AudioAnalysis {
        let volume = self.level();
        AudioAnalysis {
            volume,
            peak: self.peak,
            is_active: volume >= ACTIVITY_FLOOR,
        }
    }
}

/// Refill `samples` from the analyser and compute the current level.
///
/// The buffer is mutated in place; size it to the analyser's bin count.
pub fn read_audio_level(analyser: &mut dyn FrequencyAnalyser, samples: &mut [u8]) -> u8 {
    analyser.byte_frequency_data(samples);
    audio_level(samples)
}

/// Map frequency-domain magnitudes to a 0-100 loudness value.
///
/// Arithmetic mean across all bins, normalized by the 255 byte ceiling,
/// scaled to 100 and by the meter gain, rounded, then clamped to 100. The
/// lower bound is implicit since inputs are non-negative.
pub fn audio_level(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 0;
    }

    let sum: u32 = samples.iter().map(|&s| u32::from(s)).sum();
    let average = f64::from(sum) / samples.len() as f64;
    let scaled = (average / 255.0) * 100.0 * LEVEL_GAIN;
    scaled.round().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnalyser {
        bins: Vec<u8>,
    }

    impl FrequencyAnalyser for FixedAnalyser {
        fn frequency_bin_count(&self) -> usize {
            self.bins.len()
        }

        fn byte_frequency_data(&mut self, data: &mut [u8]) {
            data.copy_from_slice(&self.bins);
        }
    }

    #[test]
    fn test_level_silence() {
        assert_eq!(audio_level(&[0; 128]), 0);
    }

    #[test]
    fn test_level_full_scale() {
        assert_eq!(audio_level(&[255; 128]), 100);
    }

    #[test]
    fn test_level_clamps_below_max_input() {
        // round(127 / 255 * 100 * 2) = 100 before clamping even kicks in;
        // anything from half scale up pegs the meter.
        assert_eq!(audio_level(&[127; 128]), 100);
        assert_eq!(audio_level(&[128; 128]), 100);
    }

    #[test]
    fn test_level_midrange() {
        // round(63 / 255 * 100 * 2) = round(49.4) = 49
        assert_eq!(audio_level(&[63; 128]), 49);
    }

    #[test]
    fn test_level_mixed_bins() {
        // mean 50 -> round(50 / 255 * 200) = round(39.2) = 39
        let mut samples = vec![0u8; 64];
        samples.extend_from_slice(&[100; 64]);
        assert_eq!(audio_level(&samples), 39);
    }

    #[test]
    fn test_level_empty_buffer() {
        assert_eq!(audio_level(&[]), 0);
    }

    #[test]
    fn test_level_always_in_range() {
        for value in [0u8, 1, 5, 63, 64, 127, 128, 200, 254, 255] {
            let level = audio_level(&[value; 128]);
            assert!(level <= 100, "level {} out of range for bins {}", level, value);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = AnalyserConfig::default();
        assert_eq!(config.fft_size, 256);
        assert_eq!(config.smoothing_time_constant, 0.8);
        assert_eq!(config.frequency_bin_count(), 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_fft_size() {
        let config = AnalyserConfig {
            fft_size: 100,
            ..AnalyserConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyserConfig {
            fft_size: 16,
            ..AnalyserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_smoothing() {
        let config = AnalyserConfig {
            smoothing_time_constant: 1.5,
            ..AnalyserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analyzer_buffer_sized_to_bins() {
        let analyzer = AudioAnalyzer::new(Box::new(FixedAnalyser { bins: vec![0; 128] }));
        assert_eq!(analyzer.bin_count(), 128);
    }

    #[test]
    fn test_analyzer_reads_level() {
        let mut analyzer = AudioAnalyzer::new(Box::new(FixedAnalyser { bins: vec![63; 128] }));
        assert_eq!(analyzer.level(), 49);
        // Buffer is reused, not reallocated; a second read sees the same frame.
        assert_eq!(analyzer.level(), 49);
    }

    #[test]
    fn test_analyzer_tracks_peak_and_activity() {
        let mut analyzer = AudioAnalyzer::new(Box::new(FixedAnalyser { bins: vec![63; 128] }));
        let first = analyzer.read();
        assert_eq!(first.volume, 49);
        assert_eq!(first.peak, 49);
        assert!(first.is_active);
    }

    #[test]
    fn test_analyzer_silence_is_inactive() {
        let mut analyzer = AudioAnalyzer::new(Box::new(FixedAnalyser { bins: vec![0; 128] }));
        let analysis = analyzer.read();
        assert_eq!(analysis.volume, 0);
        assert!(!analysis.is_active);
    }
}
