use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Log line prefix for a level
fn level_prefix(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::TRACE => ("🔬", "TRACE"),
        Level::DEBUG => ("🐛", "DEBUG"),
        Level::INFO => ("ℹ️ ", "INFO"),
        Level::WARN => ("⚠️ ", "WARN"),
        Level::ERROR => ("❌", "ERROR"),
    }
}

/// `<emoji> <LEVEL> [HH:MM:SS]: message`, with the emitting module
/// appended in parentheses when `show_target` is set.
pub struct ReportFormatter {
    show_target: bool,
}

impl ReportFormatter {
    pub fn new(show_target: bool) -> Self {
        Self { show_target }
    }
}

impl<S, N> FormatEvent<S, N> for ReportFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let (emoji, level) = level_prefix(*metadata.level());

        write!(writer, "{} {} [{}]", emoji, level, Local::now().format("%H:%M:%S"))?;
        if self.show_target {
            write!(writer, " ({})", metadata.target())?;
        }
        write!(writer, ": ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter directive; `RUST_LOG` takes precedence
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "testreport=debug,warn"
    } else {
        "testreport=warn,error"
    }
}

/// Install the stderr subscriber. Report output stays on stdout.
/// Verbose runs also show which module logged each line.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .event_format(ReportFormatter::new(verbose))
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .try_init();
}
