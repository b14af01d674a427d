// Base reporter - wires reporter hooks to the runner's events and renders the summary

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::debug;

use super::console::{Colors, Logger};
use super::errors_printer::{ConsoleErrorsPrinter, ErrorsPrinter};
use super::{Reporter, ReporterOptions};
use crate::runner::{
    Aggregates, Emitter, ErrorEntry, EventName, FailureTreeChild, Phase, Runner, RunnerEvent,
    Summary,
};
use crate::time::humanize_millis;

const TESTS_LABEL: &str = "Tests";
const TIME_LABEL: &str = "Time";
const UNCAUGHT_LABEL: &str = "Uncaught exceptions";

/// Reporter shared with the emitter after `boot`
pub type SharedReporter<R> = Arc<Mutex<BaseReporter<R>>>;

/// State a reporter accumulates during a run, readable from every hook
pub struct ReporterContext {
    options: ReporterOptions,
    runner: Option<Arc<dyn Runner>>,
    current_file_name: Option<String>,
    current_suite_name: Option<String>,
    uncaught_exceptions: Vec<ErrorEntry>,
    logger: Logger,
    errors_printer: Option<Arc<dyn ErrorsPrinter>>,
}

impl ReporterContext {
    fn new(options: ReporterOptions) -> Self {
        Self {
            options,
            runner: None,
            current_file_name: None,
            current_suite_name: None,
            uncaught_exceptions: Vec::new(),
            logger: Logger::default(),
            errors_printer: None,
        }
    }

    pub fn options(&self) -> &ReporterOptions {
        &self.options
    }

    /// The runner, available once the reporter is booted
    pub fn runner(&self) -> Option<&Arc<dyn Runner>> {
        self.runner.as_ref()
    }

    /// File of the test or group that started last
    pub fn current_file_name(&self) -> Option<&str> {
        self.current_file_name.as_deref()
    }

    /// Suite currently executing
    pub fn current_suite_name(&self) -> Option<&str> {
        self.current_suite_name.as_deref()
    }

    pub fn uncaught_exceptions(&self) -> &[ErrorEntry] {
        &self.uncaught_exceptions
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn errors_printer(&self) -> Arc<dyn ErrorsPrinter> {
        match &self.errors_printer {
            Some(printer) => printer.clone(),
            None => Arc::new(ConsoleErrorsPrinter::new(
                self.options.stack_lines_count,
                self.logger.clone(),
            )),
        }
    }

    /// Print the tests summary
    pub async fn print_summary(&self, summary: &Summary) -> Result<()> {
        let colors = *self.logger.colors();
        self.logger.log("");

        if summary.aggregates.total == 0 && !summary.has_error {
            self.logger.log(colors.black_on_yellow(" NO TESTS EXECUTED "));
            return Ok(());
        }

        if summary.has_error {
            self.logger.log(colors.black_on_red(" FAILED "));
        } else {
            self.logger.log(colors.black_on_green(" PASSED "));
        }
        self.logger.log("");

        for line in aggregate_lines(&summary.aggregates, summary.duration, &colors) {
            self.logger.log(line);
        }

        if !summary.failure_tree.is_empty() || !self.uncaught_exceptions.is_empty() {
            self.logger.log("");
            self.logger.log("");
        }

        let printer = self.errors_printer();

        for suite in &summary.failure_tree {
            printer.print_errors(&suite.name, &suite.errors).await?;

            for child in &suite.children {
                match child {
                    FailureTreeChild::Group(group) => {
                        printer.print_errors(&group.name, &group.errors).await?;
                        for test in &group.children {
                            printer.print_errors(&test.title, &test.errors).await?;
                        }
                    }
                    FailureTreeChild::Test(test) => {
                        printer.print_errors(&test.title, &test.errors).await?;
                    }
                }
            }
        }

        printer
            .print_errors("Uncaught exception", &self.uncaught_exceptions)
            .await
    }
}

impl std::fmt::Debug for ReporterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterContext")
            .field("options", &self.options)
            .field("booted", &self.runner.is_some())
            .field("current_file_name", &self.current_file_name)
            .field("current_suite_name", &self.current_suite_name)
            .field("uncaught_exceptions", &self.uncaught_exceptions.len())
            .finish()
    }
}

/// Aggregate lines of the summary: tests, time, and uncaught exceptions
/// when there were any. Labels share one column width.
pub(crate) fn aggregate_lines(aggregates: &Aggregates, duration: f64, colors: &Colors) -> Vec<String> {
    let width = if aggregates.uncaught_exceptions > 0 {
        UNCAUGHT_LABEL.len()
    } else {
        TESTS_LABEL.len()
    };
    let label = |text: &str| colors.dim(format!("{:<width$}", text, width = width));

    let categories: [(usize, &str, fn(&Colors, String) -> String); 5] = [
        (aggregates.passed, "passed", |c, s| c.green(s)),
        (aggregates.failed, "failed", |c, s| c.red(s)),
        (aggregates.todo, "todo", |c, s| c.cyan(s)),
        (aggregates.skipped, "skipped", |c, s| c.yellow(s)),
        (aggregates.regression, "regression", |c, s| c.magenta(s)),
    ];
    let fragments: Vec<String> = categories
        .iter()
        .filter(|(count, _, _)| *count > 0)
        .map(|(count, name, paint)| paint(colors, format!("{} {}", count, name)))
        .collect();

    let total = colors.dim(format!("({})", aggregates.total));
    let tests = if fragments.is_empty() {
        total
    } else {
        format!("{} {}", fragments.join(", "), total)
    };

    let mut lines = vec![
        format!("{}: {}", label(TESTS_LABEL), tests),
        format!("{}: {}", label(TIME_LABEL), colors.dim(humanize_millis(duration))),
    ];
    if aggregates.uncaught_exceptions > 0 {
        lines.push(format!(
            "{}: {}",
            label(UNCAUGHT_LABEL),
            colors.red(aggregates.uncaught_exceptions)
        ));
    }
    lines
}

/// Hooks plus the bookkeeping every reporter needs
pub struct BaseReporter<R> {
    context: ReporterContext,
    reporter: R,
}

impl<R: Reporter> BaseReporter<R> {
    pub fn new(reporter: R, options: ReporterOptions) -> Self {
        Self {
            context: ReporterContext::new(options),
            reporter,
        }
    }

    /// Send output to `logger` instead of stdout
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.context.logger = logger;
        self
    }

    /// Replace the default console error printer
    pub fn with_errors_printer(mut self, printer: impl ErrorsPrinter + 'static) -> Self {
        self.context.errors_printer = Some(Arc::new(printer));
        self
    }

    pub fn context(&self) -> &ReporterContext {
        &self.context
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Print the tests summary
    pub async fn print_summary(&self, summary: &Summary) -> Result<()> {
        self.context.print_summary(summary).await
    }

    /// Record the event's side effects, then run the matching hook
    pub async fn handle(&mut self, event: RunnerEvent) -> Result<()> {
        let Self { context, reporter } = self;

        match event {
            RunnerEvent::TestStart(node) => {
                context.current_file_name = node.meta.file_name.clone();
                reporter.on_test_start(context, &node)
            }
            RunnerEvent::TestEnd(node) => reporter.on_test_end(context, &node),
            RunnerEvent::GroupStart(node) => {
                context.current_file_name = node.meta.file_name.clone();
                reporter.on_group_start(context, &node)
            }
            RunnerEvent::GroupEnd(node) => reporter.on_group_end(context, &node),
            RunnerEvent::SuiteStart(node) => {
                context.current_suite_name = Some(node.name.clone());
                reporter.on_suite_start(context, &node)
            }
            RunnerEvent::SuiteEnd(node) => {
                context.current_suite_name = None;
                reporter.on_suite_end(context, &node)
            }
            RunnerEvent::UncaughtException(error) => {
                context
                    .uncaught_exceptions
                    .push(ErrorEntry::new(Phase::Test, error));
                Ok(())
            }
            RunnerEvent::RunnerStart(node) => reporter.start(context, &node).await,
            RunnerEvent::RunnerEnd(node) => reporter.end(context, &node).await,
        }
    }
}

impl<R: Reporter + 'static> BaseReporter<R> {
    /// Attach the reporter to a run.
    ///
    /// Stores the runner and subscribes to every lifecycle event on
    /// `emitter`. The returned handle stays usable after the run, e.g. to
    /// inspect the reporter or print the summary again.
    pub fn boot(mut self, runner: Arc<dyn Runner>, emitter: &mut Emitter) -> SharedReporter<R> {
        self.context.runner = Some(runner);
        let shared = Arc::new(Mutex::new(self));

        for name in EventName::ALL {
            let reporter = shared.clone();
            emitter.on(name, move |event| {
                let reporter = reporter.clone();
                async move {
                    let mut guard = reporter.lock().await;
                    guard.handle(event).await
                }
            });
        }
        debug!("Reporter booted");

        shared
    }
}
