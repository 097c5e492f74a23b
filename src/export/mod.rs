//! Calendar file export.

mod delivery;
mod ics_reader;
mod ics_writer;

pub use delivery::{CompletionToken, Delivery, DirectorySink, ExportRequest, FileSink, MemorySink, StdoutSink};
pub use ics_reader::{read_events, ParsedEvent, ReadError};
pub use ics_writer::{ExportOptions, IcsExporter};

/// Name of the delivered calendar file.
pub const SCHEDULE_FILE_NAME: &str = "schedule.ics";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Event {index} ('{title}') cannot be written: {reason}")]
    InvalidEvent { index: usize, title: String, reason: String },
    #[error("Failed to deliver {filename}: {source}")]
    Delivery {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}
