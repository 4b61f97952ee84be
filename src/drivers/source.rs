use std::collections::HashSet;
use crate::drivers::CollarError;
use crate::types::{Channel, Vector3};
/// Capability surface of the motion sensor hardware.
///
/// Accelerometer and gyroscope do not share a FIFO, so rates and reads are per channel.
/// Each `true` from `data_available` hands exactly one raw arrival to the caller; whatever
/// the caller does not read on that arrival is dropped by the source.
pub trait SensorSource {
    fn begin(&mut self) -> Result<(), CollarError>;
    fn data_available(&mut self) -> bool;
    fn native_sample_rate(&self, channel: Channel) -> f32;
    fn read_sample(&mut self, channel: Channel) -> Result<Vector3, CollarError>;
}
/// In-memory source with a fixed number of arrivals, useful for tests and deterministic playback.
///
/// Samples encode where they came from: `x` is the arrival number, `y` the channel index,
/// `z` the negated arrival number.
pub struct ScriptedSource {
    rates: [f32; 2],
    total_arrivals: usize,
    arrival: usize,
    failures: HashSet<(usize, Channel)>,
    fail_begin: bool,
    reads: Vec<(usize, Channel)>,
}
impl ScriptedSource {
    pub fn new(gyro_rate_hz: f32, accel_rate_hz: f32, total_arrivals: usize) -> Self {
        let mut rates = [0.0; 2];
        rates[Channel::Gyroscope.index()] = gyro_rate_hz;
        rates[Channel::Accelerometer.index()] = accel_rate_hz;
        Self {
            rates,
            total_arrivals,
            arrival: 0,
            failures: HashSet::new(),
            fail_begin: false,
            reads: Vec::new(),
        }
    }
    /// Make the read of `channel` on the given 1-based arrival fail.
    pub fn with_failure(mut self, arrival: usize, channel: Channel) -> Self {
        self.failures.insert((arrival, channel));
        self
    }
    pub fn failing_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }
    /// Arrival numbers on which `channel` was read, failed reads included.
    pub fn reads_for(&self, channel: Channel) -> Vec<usize> {
        self.reads
            .iter()
            .filter(|(_, c)| *c == channel)
            .map(|(arrival, _)| *arrival)
            .collect()
    }
}
impl SensorSource for ScriptedSource {
    fn begin(&mut self) -> Result<(), CollarError> {
        if self.fail_begin {
            return Err(CollarError::HardwareInit("scripted begin failure".into()));
        }
        Ok(())
    }
    fn data_available(&mut self) -> bool {
        if self.arrival >= self.total_arrivals {
            return false;
        }
        self.arrival += 1;
        true
    }
    fn native_sample_rate(&self, channel: Channel) -> f32 {
        self.rates[channel.index()]
    }
    fn read_sample(&mut self, channel: Channel) -> Result<Vector3, CollarError> {
        self.reads.push((self.arrival, channel));
        if self.failures.contains(&(self.arrival, channel)) {
            return Err(CollarError::ChannelRead {
                channel,
                reason: format!("scripted failure on arrival {}", self.arrival),
            });
        }
        let n = self.arrival as f32;
        Ok(Vector3::new(n, channel.index() as f32, -n))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn scripted_source_hands_out_fixed_arrivals() {
        let mut source = ScriptedSource::new(95.0, 119.0, 2);
        assert!(source.data_available());
        assert!(source.data_available());
        assert!(!source.data_available());
        assert_eq!(source.native_sample_rate(Channel::Gyroscope), 95.0);
        assert_eq!(source.native_sample_rate(Channel::Accelerometer), 119.0);
    }
    #[test]
    fn scripted_failures_hit_only_their_arrival() {
        let mut source = ScriptedSource::new(119.0, 119.0, 3).with_failure(2, Channel::Gyroscope);
        source.data_available();
        assert_eq!(
            source.read_sample(Channel::Gyroscope).unwrap(),
            Vector3::new(1.0, 0.0, -1.0)
        );
        source.data_available();
        assert!(source.read_sample(Channel::Gyroscope).is_err());
        assert!(source.read_sample(Channel::Accelerometer).is_ok());
        assert_eq!(source.reads_for(Channel::Gyroscope), vec![1, 2]);
    }
    #[test]
    fn begin_failure_is_hardware_init() {
        let mut source = ScriptedSource::new(119.0, 119.0, 0).failing_begin();
        assert!(matches!(source.begin(), Err(CollarError::HardwareInit(_))));
    }
}
