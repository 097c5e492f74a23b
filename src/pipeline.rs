//! End-to-end export: fetch, decode, extract, serialize, deliver.

use crate::config::Config;
use crate::export::{
    Delivery, ExportError, ExportOptions, ExportRequest, FileSink, IcsExporter, SCHEDULE_FILE_NAME,
};
use crate::schedule::{extract_events_with, CalendarEvent, RowFilter, ScheduleError};
use crate::spreadsheet::{decode, DecodeError, SourceError, SourceRow, SpreadsheetFormat, SpreadsheetSource};
use log::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Short message for the end user; details go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::Source(_) => {
                "Could not retrieve your course spreadsheet. Please try again."
            }
            PipelineError::Decode(_) => "The course spreadsheet could not be read.",
            PipelineError::Schedule(_) | PipelineError::Export(ExportError::InvalidEvent { .. }) => {
                "There was a problem with generating your calendar file. Check logs for more information."
            }
            PipelineError::Export(ExportError::Delivery { .. }) => {
                "The calendar file could not be saved."
            }
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::Source(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub events: usize,
    pub delivery: Delivery,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    filter: RowFilter,
    exporter: IcsExporter,
}

impl Pipeline {
    pub fn new(filter: RowFilter, options: ExportOptions) -> Self {
        Self { filter, exporter: IcsExporter::new(options) }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.row_filter(), config.export_options()?))
    }

    pub fn load_rows(
        &self,
        source: &dyn SpreadsheetSource,
        locator: &str,
    ) -> Result<Vec<SourceRow>, PipelineError> {
        let bytes = source.fetch(locator)?;
        let format = source
            .format_hint(locator)
            .unwrap_or_else(|| SpreadsheetFormat::sniff(&bytes));
        info!("Decoding {} ({:?}, {} bytes)", locator, format, bytes.len());
        Ok(decode(&bytes, format)?)
    }

    pub fn events(&self, rows: &[SourceRow]) -> Result<Vec<CalendarEvent>, ScheduleError> {
        extract_events_with(&self.filter, rows)
    }

    /// Rows to calendar payload, with no I/O.
    pub fn render(&self, rows: &[SourceRow]) -> Result<String, PipelineError> {
        let events = self.events(rows)?;
        Ok(self.exporter.export(&events)?)
    }

    /// Run one request to completion. Nothing is delivered unless every
    /// stage succeeds.
    pub fn run(
        &self,
        source: &dyn SpreadsheetSource,
        request: ExportRequest,
        sink: &mut dyn FileSink,
    ) -> Result<ExportSummary, PipelineError> {
        let result = self.run_inner(source, request, sink);
        if let Err(e) = &result {
            error!("Export failed: {}", e);
        }
        result
    }

    fn run_inner(
        &self,
        source: &dyn SpreadsheetSource,
        request: ExportRequest,
        sink: &mut dyn FileSink,
    ) -> Result<ExportSummary, PipelineError> {
        let rows = self.load_rows(source, request.locator())?;
        let events = self.events(&rows)?;
        let payload = self.exporter.export(&events)?;
        let delivery = request.complete(sink, SCHEDULE_FILE_NAME, &payload)?;
        info!("Exported {} events from {} rows", events.len(), rows.len());
        Ok(ExportSummary { rows: rows.len(), events: events.len(), delivery })
    }
}

/// Export `locator` with default filtering.
pub fn run_export(
    source: &dyn SpreadsheetSource,
    locator: &str,
    options: ExportOptions,
    sink: &mut dyn FileSink,
) -> Result<ExportSummary, PipelineError> {
    Pipeline::new(RowFilter::default(), options).run(source, ExportRequest::new(locator), sink)
}
