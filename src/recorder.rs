use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::{Channel, Vector3};

/// Writes accepted tuples as CSV rows for building labelled training sets.
pub struct TupleRecorder<W: Write> {
    writer: W,
    rows: u64,
}

impl TupleRecorder<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let recorder = Self::new(BufWriter::new(file))?;
        log::info!("recording started: {}", path.display());
        Ok(recorder)
    }
}

impl<W: Write> TupleRecorder<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "arrival,channel,x,y,z")?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_tuple(
        &mut self,
        arrival: u64,
        channel: Channel,
        tuple: Vector3,
    ) -> io::Result<()> {
        writeln!(
            self.writer,
            "{arrival},{},{:.4},{:.4},{:.4}",
            channel.axis_prefix(),
            tuple.x,
            tuple.y,
            tuple.z
        )?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        log::info!("recording saved ({} rows)", self.rows);
        Ok(self.writer)
    }
}
