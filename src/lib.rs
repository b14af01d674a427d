pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;
pub mod time;

pub use error::{ReportError, ReportResult};
pub use report::{BaseReporter, Reporter, ReporterContext, ReporterOptions};
pub use runner::{Emitter, Runner, RunnerEvent, Summary};
