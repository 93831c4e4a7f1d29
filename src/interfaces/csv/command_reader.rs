use crate::domain::command::{Command, CommandRecord};
use crate::error::{Result, VendingError};
use std::io::Read;

/// Reads customer commands from a CSV script with an `action,item` header.
///
/// Whitespace is trimmed and records may omit the trailing item, so
/// `cancel` works with or without a comma after it.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses each row into a [`Command`].
    ///
    /// A bad row yields an error and the iterator carries on with the next.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(VendingError::from).and_then(Command::try_from))
    }
}
