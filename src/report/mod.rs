// Report module - reporter hooks, the base reporter, and concrete reporters

pub mod base;
pub mod console;
pub mod dot;
pub mod errors_printer;
pub mod summary;

use anyhow::Result;
use async_trait::async_trait;

use crate::runner::{
    GroupEndNode, GroupStartNode, RunnerEndNode, RunnerStartNode, SuiteEndNode, SuiteStartNode,
    TestEndNode, TestStartNode,
};
pub use base::{BaseReporter, ReporterContext, SharedReporter};
pub use console::{Colors, Logger, MemoryOutput};
pub use dot::DotReporter;
pub use errors_printer::{ConsoleErrorsPrinter, ErrorsPrinter};
pub use summary::SummaryReporter;

pub const DEFAULT_STACK_LINES_COUNT: usize = 5;

/// Options accepted by every reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterOptions {
    /// Stack lines shown per error
    pub stack_lines_count: usize,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            stack_lines_count: DEFAULT_STACK_LINES_COUNT,
        }
    }
}

impl ReporterOptions {
    /// Zero or `None` fall back to the default of 5 lines
    pub fn new(stack_lines_count: Option<usize>) -> Self {
        Self {
            stack_lines_count: stack_lines_count
                .filter(|count| *count > 0)
                .unwrap_or(DEFAULT_STACK_LINES_COUNT),
        }
    }
}

/// Lifecycle hooks of a reporter.
///
/// Every hook defaults to a no-op; a concrete reporter overrides the ones it
/// needs. Hooks receive the reporter context, which exposes the runner, the
/// current file and suite, and the uncaught exceptions seen so far.
#[async_trait]
pub trait Reporter: Send {
    fn on_test_start(&mut self, _ctx: &ReporterContext, _node: &TestStartNode) -> Result<()> {
        Ok(())
    }

    fn on_test_end(&mut self, _ctx: &ReporterContext, _node: &TestEndNode) -> Result<()> {
        Ok(())
    }

    fn on_group_start(&mut self, _ctx: &ReporterContext, _node: &GroupStartNode) -> Result<()> {
        Ok(())
    }

    fn on_group_end(&mut self, _ctx: &ReporterContext, _node: &GroupEndNode) -> Result<()> {
        Ok(())
    }

    fn on_suite_start(&mut self, _ctx: &ReporterContext, _node: &SuiteStartNode) -> Result<()> {
        Ok(())
    }

    fn on_suite_end(&mut self, _ctx: &ReporterContext, _node: &SuiteEndNode) -> Result<()> {
        Ok(())
    }

    /// Called when the runner starts
    async fn start(&mut self, _ctx: &ReporterContext, _node: &RunnerStartNode) -> Result<()> {
        Ok(())
    }

    /// Called when the runner ends
    async fn end(&mut self, _ctx: &ReporterContext, _node: &RunnerEndNode) -> Result<()> {
        Ok(())
    }
}
