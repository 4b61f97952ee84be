use ndarray::{Array1, Array2};
use serde::Serialize;
use crate::config::WindowConfig;
use crate::drivers::buffer::ChannelRing;
use crate::drivers::decimator::{decimation_ratio, SkipCounter};
use crate::drivers::diagnostics::{DiagnosticSink, LogSink};
use crate::drivers::error::{ArrivalError, CollarError};
use crate::drivers::source::SensorSource;
use crate::types::{ArrivalOutcome, Channel, ChannelOutcome, Vector3};
/// Decimation state and window for one sensor channel.
struct ChannelState {
    channel: Channel,
    native_rate_hz: f32,
    counter: SkipCounter,
    ring: ChannelRing,
    read_errors: u64,
}
impl ChannelState {
    fn new(
        channel: Channel,
        native_rate_hz: f32,
        config: &WindowConfig,
    ) -> Result<Self, CollarError> {
        let ratio = decimation_ratio(native_rate_hz, config.target_hz);
        if !(native_rate_hz >= config.target_hz) {
            log::warn!(
                "{channel} rate {native_rate_hz} Hz is below target {} Hz; keeping every sample",
                config.target_hz
            );
        }
        log::info!("{channel} sample rate {native_rate_hz:.2} Hz, keeping 1 in {ratio}");
        Ok(Self {
            channel,
            native_rate_hz,
            counter: SkipCounter::new(ratio),
            ring: ChannelRing::with_capacity(config.window_samples)?,
            read_errors: 0,
        })
    }
    fn accept(&mut self, tuple: Vector3) {
        self.ring.write_tuple(tuple);
        self.counter.reset();
        log::debug!(
            "{} tuple #{} -> {:?}",
            self.channel,
            self.ring.accepted(),
            tuple.as_array()
        );
    }
    fn stats(&self) -> ChannelStats {
        ChannelStats {
            channel: self.channel,
            native_rate_hz: self.native_rate_hz,
            decimation_ratio: self.counter.ratio(),
            accepted: self.ring.accepted(),
            read_errors: self.read_errors,
            cursor: self.ring.cursor(),
            window_full: self.ring.is_full(),
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelStats {
    pub channel: Channel,
    pub native_rate_hz: f32,
    pub decimation_ratio: u32,
    pub accepted: u64,
    pub read_errors: u64,
    pub cursor: usize,
    pub window_full: bool,
}
/// Result of draining every pending arrival.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PollSummary {
    pub arrivals: u64,
    pub accepted_gyroscope: u64,
    pub accepted_accelerometer: u64,
    pub read_errors: u64,
}
impl PollSummary {
    /// Count one arrival, failed or not.
    pub fn record(&mut self, result: &Result<ArrivalOutcome, ArrivalError>) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.read_errors += 1;
                &err.outcome
            }
        };
        self.arrivals += 1;
        if outcome.accepted(Channel::Gyroscope) {
            self.accepted_gyroscope += 1;
        }
        if outcome.accepted(Channel::Accelerometer) {
            self.accepted_accelerometer += 1;
        }
    }
}
/// Keeps 1 in `ratio` raw IMU samples per channel and holds the latest window of each.
///
/// The two channels are decimated independently. Readers see the live rings: a snapshot
/// taken between arrivals reflects everything written so far and nothing more.
pub struct DecimatingWindowBuffer<S: SensorSource, D: DiagnosticSink = LogSink> {
    source: S,
    sink: D,
    config: WindowConfig,
    channels: [ChannelState; 2],
    arrivals: u64,
}
impl<S: SensorSource> DecimatingWindowBuffer<S, LogSink> {
    pub fn initialize(source: S, config: WindowConfig) -> Result<Self, CollarError> {
        Self::initialize_with_sink(source, config, LogSink)
    }
}
impl<S: SensorSource, D: DiagnosticSink> DecimatingWindowBuffer<S, D> {
    /// Start the sensor, discover native rates and derive each channel's ratio.
    ///
    /// Failures are reported to `sink` once and returned; there is no retry.
    pub fn initialize_with_sink(
        mut source: S,
        config: WindowConfig,
        mut sink: D,
    ) -> Result<Self, CollarError> {
        let setup = config.validate().and_then(|()| {
            source.begin().map_err(|err| match err {
                CollarError::HardwareInit(_) => err,
                other => CollarError::HardwareInit(other.to_string()),
            })
        });
        if let Err(err) = setup {
            sink.report(&err);
            return Err(err);
        }
        let gyro = ChannelState::new(
            Channel::Gyroscope,
            source.native_sample_rate(Channel::Gyroscope),
            &config,
        );
        let accel = ChannelState::new(
            Channel::Accelerometer,
            source.native_sample_rate(Channel::Accelerometer),
            &config,
        );
        let (gyro, accel) = match (gyro, accel) {
            (Ok(gyro), Ok(accel)) => (gyro, accel),
            (Err(err), _) | (_, Err(err)) => {
                sink.report(&err);
                return Err(err);
            }
        };
        Ok(Self {
            source,
            sink,
            config,
            channels: [gyro, accel],
            arrivals: 0,
        })
    }
    /// Handle one raw arrival.
    ///
    /// Channels are evaluated in [`Channel::FEATURE_ORDER`]. A due channel is read and its
    /// tuple written; a failed read leaves its counter untouched so it is retried on the next
    /// arrival, and stops evaluation of the remaining channels. Every counter ticks afterwards.
    /// The error carries the outcome, so a tuple kept before the failure is still visible.
    pub fn on_raw_sample_available(&mut self) -> Result<ArrivalOutcome, ArrivalError> {
        let mut outcome = ArrivalOutcome::pending();
        let mut failure = None;
        for channel in Channel::FEATURE_ORDER {
            let state = &mut self.channels[channel.index()];
            if !state.counter.is_due() {
                outcome.set(channel, ChannelOutcome::Skipped);
                continue;
            }
            match self.source.read_sample(channel) {
                Ok(tuple) => {
                    state.accept(tuple);
                    outcome.set(channel, ChannelOutcome::Accepted);
                }
                Err(err) => {
                    state.read_errors += 1;
                    outcome.set(channel, ChannelOutcome::ReadError);
                    failure = Some(match err {
                        CollarError::ChannelRead { .. } => err,
                        other => CollarError::ChannelRead {
                            channel,
                            reason: other.to_string(),
                        },
                    });
                    break;
                }
            }
        }
        for state in &mut self.channels {
            state.counter.tick();
        }
        self.arrivals += 1;
        match failure {
            Some(error) => {
                self.sink.report(&error);
                Err(ArrivalError { outcome, error })
            }
            None => Ok(outcome),
        }
    }
    /// Handle the next arrival if the sensor has one pending.
    pub fn poll_once(&mut self) -> Option<Result<ArrivalOutcome, ArrivalError>> {
        if !self.source.data_available() {
            return None;
        }
        Some(self.on_raw_sample_available())
    }
    /// Drain every pending arrival. Read failures end only the arrival they happened on.
    pub fn poll(&mut self) -> PollSummary {
        let mut summary = PollSummary::default();
        while let Some(result) = self.poll_once() {
            summary.record(&result);
        }
        summary
    }
    /// Window of `channel`, oldest scalar first.
    pub fn snapshot(&self, channel: Channel) -> Vec<f32> {
        self.channels[channel.index()].ring.snapshot()
    }
    /// Last tuple kept for `channel`.
    pub fn latest(&self, channel: Channel) -> Option<Vector3> {
        self.channels[channel.index()].ring.latest()
    }
    /// Window of `channel` with one row per tuple.
    pub fn window_matrix(&self, channel: Channel) -> Array2<f32> {
        self.channels[channel.index()].ring.as_matrix()
    }
    /// Gyroscope window followed by accelerometer window, flattened for the classifier.
    pub fn feature_vector(&self) -> Array1<f32> {
        let mut features = Vec::with_capacity(self.config.window_samples * 2);
        for channel in Channel::FEATURE_ORDER {
            features.extend(self.snapshot(channel));
        }
        Array1::from(features)
    }
    /// Both windows have been filled at least once.
    pub fn window_ready(&self) -> bool {
        self.channels.iter().all(|state| state.ring.is_full())
    }
    pub fn ratio(&self, channel: Channel) -> u32 {
        self.channels[channel.index()].counter.ratio()
    }
    pub fn native_rate(&self, channel: Channel) -> f32 {
        self.channels[channel.index()].native_rate_hz
    }
    pub fn skip_count(&self, channel: Channel) -> u32 {
        self.channels[channel.index()].counter.count()
    }
    pub fn cursor(&self, channel: Channel) -> usize {
        self.channels[channel.index()].ring.cursor()
    }
    pub fn accepted(&self, channel: Channel) -> u64 {
        self.channels[channel.index()].ring.accepted()
    }
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }
    pub fn stats(&self) -> Vec<ChannelStats> {
        Channel::FEATURE_ORDER
            .iter()
            .map(|channel| self.channels[channel.index()].stats())
            .collect()
    }
    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
