// src/types.rs
use serde::Serialize;

/// Motion sensor channel on the collar IMU.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Gyroscope,
    Accelerometer,
}

impl Channel {
    /// Feature ordering handed to the classifier: gyroscope window first, then accelerometer.
    pub const FEATURE_ORDER: [Channel; 2] = [Channel::Gyroscope, Channel::Accelerometer];

    pub fn index(self) -> usize {
        match self {
            Channel::Gyroscope => 0,
            Channel::Accelerometer => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Gyroscope => "gyroscope",
            Channel::Accelerometer => "accelerometer",
        }
    }

    /// Column prefix used in recorded data (`g_x`, `a_x`, ...).
    pub fn axis_prefix(self) -> &'static str {
        match self {
            Channel::Gyroscope => "g",
            Channel::Accelerometer => "a",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One 3-axis reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// What happened to one channel on a single raw arrival.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum ChannelOutcome {
    Accepted,
    Skipped,
    ReadError,
    /// An earlier channel failed on the same arrival, so this one was never looked at.
    NotEvaluated,
}

/// Per-channel outcomes for one raw arrival.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ArrivalOutcome {
    outcomes: [ChannelOutcome; 2],
}

impl ArrivalOutcome {
    pub(crate) fn pending() -> Self {
        Self {
            outcomes: [ChannelOutcome::NotEvaluated; 2],
        }
    }

    pub(crate) fn set(&mut self, channel: Channel, outcome: ChannelOutcome) {
        self.outcomes[channel.index()] = outcome;
    }

    pub fn get(&self, channel: Channel) -> ChannelOutcome {
        self.outcomes[channel.index()]
    }

    pub fn accepted(&self, channel: Channel) -> bool {
        self.get(channel) == ChannelOutcome::Accepted
    }
}
