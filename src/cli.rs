use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// schedule-export - turn a course registration spreadsheet into a calendar file
#[derive(Debug, Parser)]
#[command(name = "schedule-export")]
#[command(about = "Convert a course registration export into a recurring-event ICS calendar", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export the schedule as schedule.ics
    Export(ExportArgs),

    /// Print the events that would be exported, as JSON
    #[command(alias = "list")]
    Preview {
        /// Spreadsheet export (.xlsx or .csv)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Read back the events of an ICS file
    Inspect {
        /// Calendar file to read
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Spreadsheet export (.xlsx or .csv)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Directory to save schedule.ics into
    #[arg(long, short, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,

    /// Write the calendar to standard output instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// IANA timezone for event times, e.g. America/Chicago
    #[arg(long)]
    pub timezone: Option<String>,

    /// Calendar display name
    #[arg(long = "calendar-name")]
    pub calendar_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from([
            "schedule-export",
            "export",
            "courses.xlsx",
            "--out",
            "out",
            "--timezone",
            "America/Chicago",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.file, PathBuf::from("courses.xlsx"));
                assert_eq!(args.out, Some(PathBuf::from("out")));
                assert_eq!(args.timezone.as_deref(), Some("America/Chicago"));
                assert!(!args.stdout);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_out_conflicts_with_stdout() {
        let result = Cli::try_parse_from(["schedule-export", "export", "a.csv", "--out", "x", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["schedule-export", "preview", "a.csv", "--config", "c.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Preview { .. }));
    }
}
