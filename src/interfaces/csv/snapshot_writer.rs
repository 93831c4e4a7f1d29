use crate::domain::state::MachineSnapshot;
use crate::error::Result;
use std::io::Write;

/// Writes machine snapshots as CSV, header first.
pub struct SnapshotWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_snapshot(&mut self, snapshot: &MachineSnapshot) -> Result<()> {
        self.writer.serialize(snapshot)?;
        self.writer.flush()?;
        Ok(())
    }
}
