// src/drivers/mod.rs
// IMU 采集层：数据源、抽取计数器、环形窗口
pub mod buffer;
pub mod decimator;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod simulated;
pub mod source;
// 公开导出常用类型，方便外部调用
pub use buffer::ChannelRing;
pub use decimator::{decimation_ratio, SkipCounter};
pub use diagnostics::{ChannelSink, DiagnosticSink, LogSink};
pub use error::{ArrivalError, CollarError};
pub use pipeline::{ChannelStats, DecimatingWindowBuffer, PollSummary};
pub use simulated::SimulatedImu;
pub use source::{ScriptedSource, SensorSource};
