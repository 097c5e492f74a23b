pub mod cli;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod schedule;
pub mod spreadsheet;

use anyhow::{Context, Result};
use cli::{Cli, Commands, ExportArgs};
use export::{read_events, DirectorySink, ExportRequest, FileSink, StdoutSink};
use log::*;
use pipeline::Pipeline;
use spreadsheet::LocalFileSource;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Export(args) => export_command(&mut config, args),
        Commands::Preview { file } => {
            let pipeline = Pipeline::from_config(&config)?;
            let rows = pipeline.load_rows(&LocalFileSource::new(), &file.to_string_lossy())?;
            let events = pipeline.events(&rows)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
            Ok(())
        }
        Commands::Inspect { file } => {
            let payload = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let events = read_events(&payload)?;
            info!("{} contains {} events", file.display(), events.len());
            println!("{}", serde_json::to_string_pretty(&events)?);
            Ok(())
        }
    }
}

fn export_command(config: &mut Config, args: ExportArgs) -> Result<()> {
    // Flags win over the config file
    if args.timezone.is_some() {
        config.export.timezone = args.timezone;
    }
    if args.calendar_name.is_some() {
        config.export.calendar_name = args.calendar_name;
    }

    let pipeline = Pipeline::from_config(config)?;
    let mut sink: Box<dyn FileSink> = if args.stdout {
        Box::new(StdoutSink)
    } else {
        let dir = args
            .out
            .or_else(|| config.export.output_dir.clone())
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Box::new(DirectorySink::new(dir))
    };

    let request = ExportRequest::new(args.file.to_string_lossy());
    let summary = pipeline
        .run(&LocalFileSource::new(), request, sink.as_mut())
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    if !args.stdout {
        println!(
            "Exported {} events to {}",
            summary.events, summary.delivery.filename
        );
    }
    Ok(())
}

pub use config::Config;
pub use schedule::{extract_events, CalendarEvent};
pub use spreadsheet::SourceRow;
