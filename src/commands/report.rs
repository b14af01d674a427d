// Report command - render a summary, replaying the run's events through a reporter

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::cli::{Cli, ReportArgs, ReporterKind};
use crate::config::Config;
use crate::report::{
    BaseReporter, Colors, DotReporter, Logger, Reporter, ReporterOptions, SummaryReporter,
};
use crate::runner::{
    Emitter, RunnerEndNode, RunnerEvent, RunnerStartNode, StaticRunner, Summary, parse_event_log,
};

/// Render the report. Returns whether the run had errors.
pub async fn handle_report(cli: &Cli, args: &ReportArgs, config: &Config) -> Result<bool> {
    let summary = Summary::load_from_file(&args.summary)
        .with_context(|| format!("Failed to load summary: {}", args.summary.display()))?;

    let events = match &args.events {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read event log: {}", path.display()))?;
            parse_event_log(&content)
        }
        None => Vec::new(),
    };
    let events = frame_run(events, summary.has_error);
    info!("Replaying {} event(s)", events.len());

    let options = resolve_options(args.stack_lines, config);
    let logger = Logger::stdout(Colors::new(cli.use_color(config.reporter.color)));
    let has_error = summary.has_error;

    let mut emitter = Emitter::new();
    let runner = Arc::new(StaticRunner::new(summary));
    match args.reporter_kind() {
        ReporterKind::Summary => {
            boot(SummaryReporter::new(), options, logger, runner, &mut emitter);
        }
        ReporterKind::Dot => {
            boot(DotReporter::new(), options, logger, runner, &mut emitter);
        }
    }

    emitter.emit_all(events).await?;

    Ok(has_error)
}

fn boot<R: Reporter + 'static>(
    reporter: R,
    options: ReporterOptions,
    logger: Logger,
    runner: Arc<StaticRunner>,
    emitter: &mut Emitter,
) {
    BaseReporter::new(reporter, options)
        .with_logger(logger)
        .boot(runner, emitter);
}

/// Reporter options with CLI > config file > default precedence.
/// A zero `--stack-lines` counts as unset.
fn resolve_options(stack_lines: Option<usize>, config: &Config) -> ReporterOptions {
    stack_lines
        .filter(|count| *count > 0)
        .map(|count| ReporterOptions::new(Some(count)))
        .unwrap_or_else(|| config.reporter_options())
}

/// Add runner:start / runner:end when the log carries none.
/// Events recorded after runner:end stay where they are.
pub fn frame_run(mut events: Vec<RunnerEvent>, has_error: bool) -> Vec<RunnerEvent> {
    if !events
        .iter()
        .any(|event| matches!(event, RunnerEvent::RunnerStart(_)))
    {
        events.insert(0, RunnerEvent::RunnerStart(RunnerStartNode {}));
    }
    if !events
        .iter()
        .any(|event| matches!(event, RunnerEvent::RunnerEnd(_)))
    {
        events.push(RunnerEvent::RunnerEnd(RunnerEndNode { has_error }));
    }
    events
}
