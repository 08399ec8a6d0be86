use crate::error::EbResult;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Serialized, durable appends to the shared result log.
///
/// Each append takes the sink lock, opens the log in append mode, writes the
/// whole line in a single call, flushes, and closes. A crash after N results
/// therefore leaves exactly N complete lines; concurrent writers can never
/// interleave partial lines.
pub struct ResultSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultSink {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One-time header write, performed before any dispatch. Truncates the
    /// target so a log always holds exactly one header line.
    pub fn write_header(&self, header: &str) -> EbResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = File::create(&self.path)?;
        file.write_all(format!("{}\n", header).as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Appends one complete line. The line must not contain newlines.
    pub fn append(&self, line: &str) -> EbResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format!("{}\n", line).as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
