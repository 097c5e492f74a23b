//! Handing the finished calendar file to its destination.

use super::ExportError;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Receives the finished payload under its file name.
pub trait FileSink {
    fn deliver(&mut self, filename: &str, payload: &str) -> std::io::Result<()>;
}

/// Writes files into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn deliver(&mut self, filename: &str, payload: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, payload)?;
        info!("Saved {}", path.display());
        Ok(())
    }
}

/// Prints the payload to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl FileSink for StdoutSink {
    fn deliver(&mut self, _filename: &str, payload: &str) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(payload.as_bytes())?;
        handle.flush()
    }
}

/// Keeps delivered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, String)>,
}

impl FileSink for MemorySink {
    fn deliver(&mut self, filename: &str, payload: &str) -> std::io::Result<()> {
        self.files.push((filename.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Proof that a request has not delivered yet. Not `Clone`: it is consumed
/// by the one delivery it permits.
#[derive(Debug)]
pub struct CompletionToken {
    _private: (),
}

impl CompletionToken {
    fn redeem(self, locator: &str) {
        debug!("Request for {} completed", locator);
    }
}

/// One export run. Each request delivers at most once.
#[derive(Debug)]
pub struct ExportRequest {
    locator: String,
    token: CompletionToken,
}

/// What a completed request delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub locator: String,
    pub filename: String,
    pub bytes: usize,
}

impl ExportRequest {
    pub fn new(locator: impl Into<String>) -> Self {
        Self { locator: locator.into(), token: CompletionToken { _private: () } }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Deliver the payload and retire the request.
    pub fn complete(
        self,
        sink: &mut dyn FileSink,
        filename: &str,
        payload: &str,
    ) -> Result<Delivery, ExportError> {
        let ExportRequest { locator, token } = self;
        token.redeem(&locator);
        sink.deliver(filename, payload).map_err(|source| ExportError::Delivery {
            filename: filename.to_string(),
            source,
        })?;
        Ok(Delivery { locator, filename: filename.to_string(), bytes: payload.len() })
    }
}
