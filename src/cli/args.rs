// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Built-in reporters selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterKind {
    Summary,
    Dot,
}

impl std::str::FromStr for ReporterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "dot" | "dots" => Ok(Self::Dot),
            other => Err(format!("unknown reporter: {}", other)),
        }
    }
}

/// Render test-runner summaries and event logs
#[derive(Parser, Debug)]
#[command(name = "testreport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render test run summaries and replay runner event logs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a run summary, optionally replaying its event log first
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Summary JSON produced by the runner
    #[arg(long, value_name = "FILE")]
    pub summary: PathBuf,

    /// Newline-delimited JSON event log to replay
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Reporter to render with
    #[arg(short = 'r', long, default_value = "summary", value_parser = ["summary", "dot"])]
    pub reporter: String,

    /// Stack lines shown per error (overrides the config file)
    #[arg(long, value_name = "N")]
    pub stack_lines: Option<usize>,
}

impl ReportArgs {
    pub fn reporter_kind(&self) -> ReporterKind {
        self.reporter.parse().unwrap_or(ReporterKind::Summary)
    }
}

impl Cli {
    /// Whether output should be colored, given the config file setting
    pub fn use_color(&self, config_color: bool) -> bool {
        !self.no_color && config_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_kind_from_str() {
        assert_eq!("summary".parse::<ReporterKind>(), Ok(ReporterKind::Summary));
        assert_eq!("DOT".parse::<ReporterKind>(), Ok(ReporterKind::Dot));
        assert!("junit".parse::<ReporterKind>().is_err());
    }

    #[test]
    fn test_parse_report_command() {
        let cli = Cli::parse_from([
            "testreport",
            "report",
            "--summary",
            "summary.json",
            "--events",
            "events.ndjson",
            "-r",
            "dot",
            "--stack-lines",
            "3",
            "--no-color",
        ]);

        assert!(cli.no_color);
        assert!(!cli.use_color(true));
        match cli.command {
            Some(Commands::Report(args)) => {
                assert_eq!(args.summary, PathBuf::from("summary.json"));
                assert_eq!(args.events, Some(PathBuf::from("events.ndjson")));
                assert_eq!(args.reporter_kind(), ReporterKind::Dot);
                assert_eq!(args.stack_lines, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_reporter_defaults_to_summary() {
        let cli = Cli::parse_from(["testreport", "report", "--summary", "s.json"]);
        match cli.command {
            Some(Commands::Report(args)) => {
                assert_eq!(args.reporter_kind(), ReporterKind::Summary);
                assert!(args.events.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
