//! Decimating IMU window buffer for the smart collar activity classifier.
//!
//! Raw accelerometer and gyroscope samples arrive at the sensor's native rate; each channel
//! keeps one in `round(native / target)` of them and stores the kept tuples in a ring that
//! always holds the most recent window.
pub mod config;
pub mod drivers;
pub mod recorder;
pub mod types;
pub use config::{AppConfig, SimulationConfig, WindowConfig};
pub use drivers::{ArrivalError, CollarError, DecimatingWindowBuffer, SensorSource};
pub use types::{ArrivalOutcome, Channel, ChannelOutcome, Vector3};
