use thiserror::Error;
use crate::types::{ArrivalOutcome, Channel};
#[derive(Debug, Error)]
pub enum CollarError {
    #[error("failed to initialize IMU: {0}")]
    HardwareInit(String),
    #[error("failed to read {channel} data: {reason}")]
    ChannelRead { channel: Channel, reason: String },
    #[error("target rate must be a positive number, got {0}")]
    InvalidTargetRate(f32),
    #[error("window must hold a non-zero multiple of 3 samples, got {samples}")]
    InvalidWindow { samples: usize },
    #[error("config error: {0}")]
    Config(String),
}
impl From<std::io::Error> for CollarError {
    fn from(value: std::io::Error) -> Self {
        CollarError::Config(value.to_string())
    }
}
impl From<serde_json::Error> for CollarError {
    fn from(value: serde_json::Error) -> Self {
        CollarError::Config(value.to_string())
    }
}
/// A failed arrival: the error plus what each channel did before processing stopped.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ArrivalError {
    pub outcome: ArrivalOutcome,
    #[source]
    pub error: CollarError,
}
