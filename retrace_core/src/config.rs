// retrace_core/src/config.rs

use serde::{Deserialize, Serialize};

use crate::error::RecorderError;

/// Tuning for a single recorder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// Longest a recording session may run, in seconds.
    pub max_record_duration: f64,
    /// Time between two recorded samples, in seconds.
    pub sample_interval: f64,
    /// Playback rate multiplier. 2.0 replays the path in half the time.
    pub playback_speed: f64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            max_record_duration: 5.0,
            sample_interval: 0.05,
            playback_speed: 1.0,
        }
    }
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), RecorderError> {
        let fields = [
            ("max_record_duration", self.max_record_duration),
            ("sample_interval", self.sample_interval),
            ("playback_speed", self.playback_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(RecorderError::InvalidConfig(format!(
                    "`{}` must be a positive, finite number (got {})",
                    name, value
                )));
            }
        }
        if self.sample_interval > self.max_record_duration {
            return Err(RecorderError::InvalidConfig(format!(
                "`sample_interval` ({}) exceeds `max_record_duration` ({})",
                self.sample_interval, self.max_record_duration
            )));
        }
        Ok(())
    }

    /// Samples produced by a recording that runs for the full duration.
    pub fn expected_sample_count(&self) -> usize {
        (self.max_record_duration / self.sample_interval + 1e-9).floor() as usize
    }

    /// Wall-clock time a single segment takes to replay.
    pub fn segment_duration(&self) -> f64 {
        self.sample_interval / self.playback_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RecorderConfig::default();
        assert_eq!(config.max_record_duration, 5.0);
        assert_eq!(config.sample_interval, 0.05);
        assert_eq!(config.playback_speed, 1.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_sample_count(), 100);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: RecorderConfig = toml::from_str("playback_speed = 2.0").unwrap();
        assert_eq!(config.playback_speed, 2.0);
        assert_eq!(config.sample_interval, 0.05);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<RecorderConfig, _> = toml::from_str("sample_rate = 20.0");
        assert!(parsed.is_err());
    }

    #[test]
    fn non_positive_values_are_invalid() {
        let config = RecorderConfig {
            playback_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RecorderError::InvalidConfig(msg)) if msg.contains("playback_speed")
        ));

        let config = RecorderConfig {
            sample_interval: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn interval_longer_than_duration_is_invalid() {
        let config = RecorderConfig {
            max_record_duration: 0.1,
            sample_interval: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn segment_duration_shrinks_with_speed() {
        let config = RecorderConfig {
            sample_interval: 0.1,
            playback_speed: 2.0,
            ..Default::default()
        };
        assert!((config.segment_duration() - 0.05).abs() < 1e-12);
    }
}
