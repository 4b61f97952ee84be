// src/main.rs
use std::path::PathBuf;
use anyhow::{Context, Result};
use serde::Serialize;
use collar_window::drivers::{ChannelStats, PollSummary, SimulatedImu};
use collar_window::recorder::TupleRecorder;
use collar_window::{AppConfig, Channel, DecimatingWindowBuffer};
#[derive(Serialize)]
struct RunSummary {
    simulated_secs: f32,
    poll: PollSummary,
    channels: Vec<ChannelStats>,
    window_ready: bool,
    window_rows: Vec<usize>,
    feature_len: usize,
    recorded_rows: u64,
}
// 第一个参数为可选的 JSON 配置文件
fn load_config() -> Result<AppConfig> {
    match std::env::args_os().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            AppConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(AppConfig::default()),
    }
}
fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    config.simulation.validate().context("invalid simulation settings")?;
    let sim = config.simulation.clone();
    let imu = SimulatedImu::new(sim.clone());
    let mut buffer =
        DecimatingWindowBuffer::initialize(imu, config.window).context("IMU setup failed")?;
    let mut recorder = match &config.record_path {
        Some(path) => Some(
            TupleRecorder::create(path)
                .with_context(|| format!("creating recording {}", path.display()))?,
        ),
        None => None,
    };
    let steps = sim.steps();
    let mut totals = PollSummary::default();
    for _ in 0..steps {
        buffer.source_mut().advance(sim.step_secs);
        // 逐个处理到达的样本，失败只影响当前这一次
        while let Some(result) = buffer.poll_once() {
            totals.record(&result);
            let outcome = match &result {
                Ok(outcome) => *outcome,
                Err(err) => err.outcome,
            };
            let Some(recorder) = recorder.as_mut() else {
                continue;
            };
            for channel in Channel::FEATURE_ORDER {
                if !outcome.accepted(channel) {
                    continue;
                }
                if let Some(tuple) = buffer.latest(channel) {
                    recorder
                        .write_tuple(buffer.arrivals(), channel, tuple)
                        .context("writing recording")?;
                }
            }
        }
    }
    let recorded_rows = match recorder {
        Some(recorder) => {
            let rows = recorder.rows();
            recorder.finish().context("flushing recording")?;
            rows
        }
        None => 0,
    };
    let summary = RunSummary {
        simulated_secs: steps as f32 * sim.step_secs,
        poll: totals,
        channels: buffer.stats(),
        window_ready: buffer.window_ready(),
        window_rows: Channel::FEATURE_ORDER
            .iter()
            .map(|channel| buffer.window_matrix(*channel).nrows())
            .collect(),
        feature_len: buffer.feature_vector().len(),
        recorded_rows,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
