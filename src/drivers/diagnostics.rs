use std::sync::mpsc::Sender;
use crate::drivers::CollarError;
/// Destination for every failure the buffer runs into.
pub trait DiagnosticSink {
    fn report(&mut self, error: &CollarError);
}
/// Routes failures to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;
impl DiagnosticSink for LogSink {
    fn report(&mut self, error: &CollarError) {
        match error {
            CollarError::ChannelRead { .. } => log::warn!("{error}"),
            _ => log::error!("{error}"),
        }
    }
}
impl<F: FnMut(&CollarError)> DiagnosticSink for F {
    fn report(&mut self, error: &CollarError) {
        self(error)
    }
}
/// Forwards failures as text to another thread, e.g. a UI or uplink task.
///
/// Once the receiver is gone, reports fall back to the log.
#[derive(Clone, Debug)]
pub struct ChannelSink(pub Sender<String>);
impl DiagnosticSink for ChannelSink {
    fn report(&mut self, error: &CollarError) {
        if self.0.send(error.to_string()).is_err() {
            log::error!("diagnostic receiver closed: {error}");
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use crate::types::Channel;
    fn read_error() -> CollarError {
        CollarError::ChannelRead {
            channel: Channel::Gyroscope,
            reason: "bus timeout".into(),
        }
    }
    #[test]
    fn closure_receives_reports() {
        let mut seen = Vec::new();
        {
            let mut sink = |err: &CollarError| seen.push(err.to_string());
            sink.report(&read_error());
            sink.report(&CollarError::HardwareInit("no IMU".into()));
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], "failed to read gyroscope data: bus timeout");
    }
    #[test]
    fn channel_sink_forwards_text() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink(tx);
        sink.report(&read_error());
        assert_eq!(rx.try_recv().unwrap(), read_error().to_string());
    }
    #[test]
    fn channel_sink_survives_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelSink(tx);
        sink.report(&read_error());
        assert!(sink.0.send(String::new()).is_err());
    }
}
