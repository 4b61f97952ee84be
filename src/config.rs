// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::drivers::CollarError;

/// Rate and window size of the decimated buffer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Rate the classifier was trained at.
    pub target_hz: f32,
    /// Scalars per channel window (3 per tuple).
    pub window_samples: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        // 200 tuples at 17 Hz, as the collar model expects.
        Self {
            target_hz: 17.0,
            window_samples: 600,
        }
    }
}

impl WindowConfig {
    /// Window sized as `seconds * target_hz` tuples.
    pub fn from_seconds(seconds: f32, target_hz: f32) -> Self {
        let tuples = (seconds * target_hz).round().max(0.0) as usize;
        Self {
            target_hz,
            window_samples: tuples * 3,
        }
    }

    pub fn window_tuples(&self) -> usize {
        self.window_samples / 3
    }

    pub fn validate(&self) -> Result<(), CollarError> {
        if !self.target_hz.is_finite() || self.target_hz <= 0.0 {
            return Err(CollarError::InvalidTargetRate(self.target_hz));
        }
        if self.window_samples == 0 || self.window_samples % 3 != 0 {
            return Err(CollarError::InvalidWindow {
                samples: self.window_samples,
            });
        }
        Ok(())
    }
}

/// Synthetic IMU used when no hardware is attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub accel_rate_hz: f32,
    pub gyro_rate_hz: f32,
    /// Probability that a single read fails.
    pub read_failure_rate: f64,
    pub duration_secs: f32,
    /// Simulated time between polls.
    pub step_secs: f32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // LSM9DS1 default output rate in continuous mode.
        Self {
            accel_rate_hz: 119.0,
            gyro_rate_hz: 119.0,
            read_failure_rate: 0.0,
            duration_secs: 15.0,
            step_secs: 0.05,
            seed: 17,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CollarError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.step_secs) || !positive(self.duration_secs) {
            return Err(CollarError::Config(format!(
                "simulation step and duration must be positive, got step {} s, duration {} s",
                self.step_secs, self.duration_secs
            )));
        }
        Ok(())
    }

    /// Number of polling steps needed to cover `duration_secs`.
    pub fn steps(&self) -> u64 {
        (self.duration_secs / self.step_secs).ceil() as u64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub simulation: SimulationConfig,
    /// Write accepted tuples as CSV here when set.
    pub record_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CollarError> {
        let text = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.window.validate()?;
        config.simulation.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_match_collar_model() {
        let window = WindowConfig::default();
        assert_eq!(window.target_hz, 17.0);
        assert_eq!(window.window_samples, 600);
        assert_eq!(window.window_tuples(), 200);
        assert!(window.validate().is_ok());
    }
    #[test]
    fn window_from_seconds() {
        let window = WindowConfig::from_seconds(2.0, 17.0);
        assert_eq!(window.window_samples, 102);
    }
    #[test]
    fn validate_rejects_bad_values() {
        let zero_rate = WindowConfig {
            target_hz: 0.0,
            window_samples: 600,
        };
        assert!(matches!(
            zero_rate.validate(),
            Err(CollarError::InvalidTargetRate(_))
        ));
        let ragged = WindowConfig {
            target_hz: 17.0,
            window_samples: 601,
        };
        assert!(matches!(
            ragged.validate(),
            Err(CollarError::InvalidWindow { samples: 601 })
        ));
    }
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "window": { "target_hz": 25.0 } }"#).unwrap();
        assert_eq!(config.window.target_hz, 25.0);
        assert_eq!(config.window.window_samples, 600);
        assert_eq!(config.simulation.accel_rate_hz, 119.0);
        assert!(config.record_path.is_none());
    }
    #[test]
    fn simulation_rejects_non_positive_step() {
        let stalled = SimulationConfig {
            step_secs: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(stalled.validate(), Err(CollarError::Config(_))));
        let defaults = SimulationConfig::default();
        assert!(defaults.validate().is_ok());
        assert_eq!(defaults.steps(), 300);
    }
    #[test]
    fn load_rejects_invalid_simulation() {
        let path = std::env::temp_dir().join("collar-window-bad-step.json");
        fs::write(&path, r#"{ "simulation": { "step_secs": -1.0 } }"#).unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, CollarError::Config(_)));
    }
    #[test]
    fn load_reports_missing_file_as_config_error() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CollarError::Config(_)));
    }
}
