use std::f32::consts::TAU;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::SimulationConfig;
use crate::drivers::{CollarError, SensorSource};
use crate::types::{Channel, Vector3};
/// Stride frequency of the synthetic gait, in Hz.
const GAIT_HZ: f32 = 1.8;
const NOISE: f32 = 0.02;
/// Synthetic LSM9DS1-like IMU: a walking gait plus noise, in g and degrees/second.
///
/// Arrivals accrue at the accelerometer rate as simulated time advances, matching hardware
/// whose read loop is gated on accelerometer availability.
pub struct SimulatedImu {
    config: SimulationConfig,
    rng: StdRng,
    accrued: f64,
    pending: u64,
    arrival: u64,
}
impl SimulatedImu {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            accrued: 0.0,
            pending: 0,
            arrival: 0,
        }
    }
    /// Let `seconds` of simulated time pass, queueing the arrivals it produces.
    pub fn advance(&mut self, seconds: f32) {
        self.accrued += seconds as f64 * self.config.accel_rate_hz as f64;
        let whole = self.accrued.floor();
        self.pending += whole as u64;
        self.accrued -= whole;
    }
    pub fn pending(&self) -> u64 {
        self.pending
    }
    fn noise(&mut self) -> f32 {
        self.rng.gen_range(-NOISE..=NOISE)
    }
}
impl SensorSource for SimulatedImu {
    fn begin(&mut self) -> Result<(), CollarError> {
        let rates = [self.config.accel_rate_hz, self.config.gyro_rate_hz];
        if rates.iter().any(|rate| !rate.is_finite() || *rate <= 0.0) {
            return Err(CollarError::HardwareInit(format!(
                "simulated IMU has no usable sample rate ({rates:?})"
            )));
        }
        log::info!("simulated IMU started (seed {})", self.config.seed);
        Ok(())
    }
    fn data_available(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        self.arrival += 1;
        true
    }
    fn native_sample_rate(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Gyroscope => self.config.gyro_rate_hz,
            Channel::Accelerometer => self.config.accel_rate_hz,
        }
    }
    fn read_sample(&mut self, channel: Channel) -> Result<Vector3, CollarError> {
        let failure_rate = match self.config.read_failure_rate {
            rate if rate.is_finite() => rate.clamp(0.0, 1.0),
            _ => 0.0,
        };
        if self.rng.gen_bool(failure_rate) {
            return Err(CollarError::ChannelRead {
                channel,
                reason: format!("simulated bus error on arrival {}", self.arrival),
            });
        }
        let t = self.arrival as f32 / self.config.accel_rate_hz;
        let phase = TAU * GAIT_HZ * t;
        let sample = match channel {
            Channel::Gyroscope => Vector3::new(
                40.0 * phase.sin() + self.noise(),
                15.0 * (2.0 * phase).sin() + self.noise(),
                5.0 * phase.cos() + self.noise(),
            ),
            Channel::Accelerometer => Vector3::new(
                0.3 * phase.sin() + self.noise(),
                0.1 * phase.cos() + self.noise(),
                1.0 + 0.25 * (2.0 * phase).sin() + self.noise(),
            ),
        };
        Ok(sample)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn advance_accrues_arrivals_at_accel_rate() {
        let mut imu = SimulatedImu::new(SimulationConfig::default());
        imu.advance(1.0);
        assert_eq!(imu.pending(), 119);
        let mut seen = 0;
        while imu.data_available() {
            seen += 1;
        }
        assert_eq!(seen, 119);
        imu.advance(0.004);
        imu.advance(0.004);
        assert_eq!(imu.pending(), 0);
        imu.advance(0.001);
        assert_eq!(imu.pending(), 1);
    }
    #[test]
    fn same_seed_same_samples() {
        let mut a = SimulatedImu::new(SimulationConfig::default());
        let mut b = SimulatedImu::new(SimulationConfig::default());
        a.advance(0.1);
        b.advance(0.1);
        assert!(a.data_available() && b.data_available());
        assert_eq!(
            a.read_sample(Channel::Accelerometer).unwrap(),
            b.read_sample(Channel::Accelerometer).unwrap()
        );
    }
    #[test]
    fn always_failing_reads_are_channel_errors() {
        let config = SimulationConfig {
            read_failure_rate: 1.0,
            ..SimulationConfig::default()
        };
        let mut imu = SimulatedImu::new(config);
        assert!(matches!(
            imu.read_sample(Channel::Gyroscope),
            Err(CollarError::ChannelRead {
                channel: Channel::Gyroscope,
                ..
            })
        ));
    }
    #[test]
    fn zero_rate_fails_to_begin() {
        let config = SimulationConfig {
            gyro_rate_hz: 0.0,
            ..SimulationConfig::default()
        };
        let mut imu = SimulatedImu::new(config);
        assert!(matches!(imu.begin(), Err(CollarError::HardwareInit(_))));
    }
}
