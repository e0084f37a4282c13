//! File-backed collaborators: the target list loader and the append-only
//! match sink.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::matching::{MatchRecord, MatchSink, TargetSet};

/// Loads the newline-delimited target list. Entries are trimmed; blank lines
/// and `#` comments are skipped. Missing or unreadable files are fatal, a
/// search without targets is pointless.
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<TargetSet> {
    let file = File::open(path).map_err(Error::Source)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(Error::Source)?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        entries.push(entry.to_string());
    }
    Ok(TargetSet::from_entries(entries))
}

/// Append-only text sink, one line per match. Each write is flushed so a hit
/// survives an interrupted run.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Error::Sink)?;
        Ok(Self { file })
    }
}

impl MatchSink for FileSink {
    fn record(&mut self, record: &MatchRecord) -> Result<()> {
        writeln!(self.file, "{}", record.to_line()).map_err(Error::Sink)?;
        self.file.flush().map_err(Error::Sink)
    }
}
